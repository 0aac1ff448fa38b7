//! Request-scoped consistency boundary.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use procura_core::config::ProcuraConfig;
use procura_core::errors::ConsistencyError;
use procura_core::ValueRecord;

use super::{CacheKey, PartitionCache, SnapshotFingerprint, ValidIdSet};
use crate::aggregation::DashboardAggregator;
use crate::outliers::{OutlierPartitioner, Partition, StatisticalSummary};
use crate::statistics::Multiplier;

/// One dashboard response's view of the outlier filter.
///
/// Create one per user-facing request and route every widget through it.
/// The scope holds the single multiplier of the request and remembers, per
/// dataset name, the snapshot it classified first.
#[derive(Debug)]
pub struct ConsistencyScope {
    label: String,
    multiplier: Multiplier,
    cache: Option<PartitionCache>,
    resolved: FxHashMap<String, Arc<ValidIdSet>>,
}

impl ConsistencyScope {
    pub fn new(label: impl Into<String>, multiplier: Multiplier) -> Self {
        Self {
            label: label.into(),
            multiplier,
            cache: None,
            resolved: FxHashMap::default(),
        }
    }

    /// Scope for a raw `k`. Rejects negative, NaN, or infinite values.
    pub fn with_k(label: impl Into<String>, k: f64) -> Result<Self, ConsistencyError> {
        Ok(Self::new(label, Multiplier::new(k)?))
    }

    /// Scope using the configured multiplier, sharing `cache` if given.
    pub fn from_config(
        label: impl Into<String>,
        config: &ProcuraConfig,
        cache: Option<&PartitionCache>,
    ) -> Result<Self, ConsistencyError> {
        let scope = Self::new(label, Multiplier::from_config(&config.outliers)?);
        Ok(match cache {
            Some(cache) => scope.with_cache(cache.clone()),
            None => scope,
        })
    }

    /// Share a caller-owned cache across scopes.
    pub fn with_cache(mut self, cache: PartitionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// The valid id set of `dataset` for this request.
    ///
    /// The first call for a dataset classifies `records` (or takes the set
    /// from the shared cache). Later calls must pass the same snapshot; a
    /// different one fails with `SnapshotDiverged`.
    pub fn valid_set<M>(
        &mut self,
        dataset: &str,
        records: &[ValueRecord<M>],
    ) -> Result<Arc<ValidIdSet>, ConsistencyError> {
        let fingerprint = SnapshotFingerprint::of(records);

        if let Some(existing) = self.resolved.get(dataset) {
            if existing.fingerprint() != fingerprint {
                tracing::warn!(
                    scope = %self.label,
                    dataset,
                    snapshot_expected = %existing.fingerprint(),
                    snapshot_found = %fingerprint,
                    first_outlier_count = existing.summary().outlier_count,
                    "dataset snapshot diverged within one scope"
                );
                return Err(ConsistencyError::SnapshotDiverged {
                    dataset: dataset.to_string(),
                    expected: existing.fingerprint().value(),
                    found: fingerprint.value(),
                });
            }
            return Ok(Arc::clone(existing));
        }

        let multiplier = self.multiplier;
        let compute = || ValidIdSet::compute_with_fingerprint(records, multiplier, fingerprint);
        let set = match &self.cache {
            Some(cache) => cache.get_or_compute(CacheKey::new(fingerprint, multiplier), compute),
            None => Arc::new(compute()),
        };

        let summary = set.summary();
        tracing::debug!(
            scope = %self.label,
            dataset,
            snapshot_fingerprint = %fingerprint,
            partition_multiplier = summary.multiplier,
            partition_threshold = summary.threshold,
            partition_outlier_count = summary.outlier_count,
            "dataset resolved"
        );

        self.resolved.insert(dataset.to_string(), Arc::clone(&set));
        Ok(set)
    }

    /// Full partition of `dataset`, for outlier inspection views.
    ///
    /// Goes through the same snapshot check as [`valid_set`](Self::valid_set),
    /// so the inspection view lists exactly the outliers the other widgets
    /// excluded.
    pub fn partition<M: Clone>(
        &mut self,
        dataset: &str,
        records: &[ValueRecord<M>],
    ) -> Result<Partition<M>, ConsistencyError> {
        let set = self.valid_set(dataset, records)?;
        let partition = OutlierPartitioner::new(self.multiplier).partition(records);
        debug_assert_eq!(partition.summary, *set.summary());
        Ok(partition)
    }

    /// Aggregator bound to the valid id set of `dataset`.
    pub fn aggregator<M>(
        &mut self,
        dataset: &str,
        records: &[ValueRecord<M>],
    ) -> Result<DashboardAggregator, ConsistencyError> {
        Ok(DashboardAggregator::new(self.valid_set(dataset, records)?))
    }

    /// Summaries of every dataset resolved so far, sorted by dataset name.
    pub fn summaries(&self) -> Vec<(&str, &StatisticalSummary)> {
        let mut out: Vec<_> = self
            .resolved
            .iter()
            .map(|(name, set)| (name.as_str(), set.summary()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}
