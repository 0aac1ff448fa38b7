//! The valid id set handed to dashboard aggregations.

use rustc_hash::FxHashSet;

use procura_core::{RecordId, ValueRecord};

use super::SnapshotFingerprint;
use crate::outliers::partitioner::classify;
use crate::outliers::StatisticalSummary;
use crate::statistics::Multiplier;

/// Ids classified as valid for one snapshot and one multiplier, together
/// with the summary and fingerprint they were derived from.
///
/// Ids are assumed unique within a snapshot.
#[derive(Debug, Clone)]
pub struct ValidIdSet {
    valid: FxHashSet<RecordId>,
    outliers: Vec<RecordId>,
    outlier_lookup: FxHashSet<RecordId>,
    summary: StatisticalSummary,
    multiplier: Multiplier,
    fingerprint: SnapshotFingerprint,
}

impl ValidIdSet {
    /// Classify `records` and keep only the ids.
    pub fn compute<M>(records: &[ValueRecord<M>], multiplier: Multiplier) -> Self {
        Self::compute_with_fingerprint(records, multiplier, SnapshotFingerprint::of(records))
    }

    pub(crate) fn compute_with_fingerprint<M>(
        records: &[ValueRecord<M>],
        multiplier: Multiplier,
        fingerprint: SnapshotFingerprint,
    ) -> Self {
        let classification = classify(records, multiplier);

        let mut valid = FxHashSet::default();
        valid.reserve(classification.summary.valid_count);
        let mut outliers = Vec::with_capacity(classification.summary.outlier_count);
        for (record, is_outlier) in records.iter().zip(classification.outlier_mask) {
            if is_outlier {
                outliers.push(record.id.clone());
            } else {
                valid.insert(record.id.clone());
            }
        }

        let outlier_lookup = outliers.iter().cloned().collect();

        Self {
            valid,
            outliers,
            outlier_lookup,
            summary: classification.summary,
            multiplier,
            fingerprint,
        }
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.valid.contains(id)
    }

    pub fn is_outlier(&self, id: &RecordId) -> bool {
        self.outlier_lookup.contains(id)
    }

    /// Number of valid ids.
    pub fn len(&self) -> usize {
        self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }

    /// Valid ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordId> + '_ {
        self.valid.iter()
    }

    /// Outlier ids in input order.
    pub fn outlier_ids(&self) -> &[RecordId] {
        &self.outliers
    }

    pub fn summary(&self) -> &StatisticalSummary {
        &self.summary
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    pub fn fingerprint(&self) -> SnapshotFingerprint {
        self.fingerprint
    }

    /// Records of `records` whose id is in the set, in input order.
    pub fn retain_valid<'a, M>(
        &'a self,
        records: &'a [ValueRecord<M>],
    ) -> impl Iterator<Item = &'a ValueRecord<M>> + 'a {
        records.iter().filter(move |r| self.contains(&r.id))
    }
}
