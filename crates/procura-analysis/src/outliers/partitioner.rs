//! The outlier partitioner.
//!
//! Pure function of `(records, k)`: no I/O, no hidden state, stable output
//! order. Each computed classification is logged at `debug` with its full
//! summary so that two widgets disagreeing about the same dataset show up
//! side by side in the logs.

use procura_core::errors::FilterError;
use procura_core::ValueRecord;

use super::types::{Partition, StatisticalSummary};
use crate::consistency::ValidIdSet;
use crate::statistics::{Multiplier, SampleStatistics};

/// Per-record classification of one batch, shared by every entry point so
/// that summaries, id sets, and full partitions can never disagree.
#[derive(Debug, Clone)]
pub(crate) struct Classification {
    pub summary: StatisticalSummary,
    /// `outlier_mask[i]` is true when `records[i]` is an outlier.
    pub outlier_mask: Vec<bool>,
}

/// Classify every record of `records` with multiplier `k`.
pub(crate) fn classify<M>(records: &[ValueRecord<M>], k: Multiplier) -> Classification {
    let sample: Vec<f64> = records.iter().filter_map(|r| r.sample_value()).collect();
    let stats = SampleStatistics::compute(&sample);
    let threshold = stats.threshold(k);

    let outlier_mask: Vec<bool> = records
        .iter()
        .map(|r| matches!(r.sample_value(), Some(v) if v > threshold))
        .collect();
    let outlier_count = outlier_mask.iter().filter(|&&o| o).count();

    let summary = StatisticalSummary {
        mean: stats.mean,
        stddev: stats.stddev,
        threshold,
        multiplier: k.value(),
        sample_size: stats.count,
        total_records: records.len(),
        valid_count: records.len() - outlier_count,
        outlier_count,
    };

    tracing::debug!(
        partition_multiplier = summary.multiplier,
        partition_mean = summary.mean,
        partition_stddev = summary.stddev,
        partition_threshold = summary.threshold,
        partition_sample_size = summary.sample_size,
        partition_total_records = summary.total_records,
        partition_valid_count = summary.valid_count,
        partition_outlier_count = summary.outlier_count,
        "outlier partition computed"
    );

    Classification {
        summary,
        outlier_mask,
    }
}

/// Partitions record batches with one fixed multiplier.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierPartitioner {
    multiplier: Multiplier,
}

impl OutlierPartitioner {
    pub fn new(multiplier: Multiplier) -> Self {
        Self { multiplier }
    }

    /// Partitioner for a raw `k`. Rejects negative, NaN, or infinite values.
    pub fn with_k(k: f64) -> Result<Self, FilterError> {
        Ok(Self::new(Multiplier::new(k)?))
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Split `records` into valid records and outliers, cloning each record
    /// into its side. Input order is preserved on both sides.
    pub fn partition<M: Clone>(&self, records: &[ValueRecord<M>]) -> Partition<M> {
        let Classification {
            summary,
            outlier_mask,
        } = classify(records, self.multiplier);

        let mut valid = Vec::with_capacity(summary.valid_count);
        let mut outliers = Vec::with_capacity(summary.outlier_count);
        for (record, is_outlier) in records.iter().zip(outlier_mask) {
            if is_outlier {
                outliers.push(record.clone());
            } else {
                valid.push(record.clone());
            }
        }

        Partition {
            valid,
            outliers,
            summary,
        }
    }

    /// Same as [`partition`](Self::partition) but moves the records instead
    /// of cloning them.
    pub fn partition_owned<M>(&self, records: Vec<ValueRecord<M>>) -> Partition<M> {
        let Classification {
            summary,
            outlier_mask,
        } = classify(&records, self.multiplier);

        let mut valid = Vec::with_capacity(summary.valid_count);
        let mut outliers = Vec::with_capacity(summary.outlier_count);
        for (record, is_outlier) in records.into_iter().zip(outlier_mask) {
            if is_outlier {
                outliers.push(record);
            } else {
                valid.push(record);
            }
        }

        Partition {
            valid,
            outliers,
            summary,
        }
    }

    /// Only the statistical summary, without materializing either side.
    pub fn summarize<M>(&self, records: &[ValueRecord<M>]) -> StatisticalSummary {
        classify(records, self.multiplier).summary
    }

    /// Only the ids, without cloning metadata.
    pub fn valid_ids<M>(&self, records: &[ValueRecord<M>]) -> ValidIdSet {
        ValidIdSet::compute(records, self.multiplier)
    }
}

/// Partition `records` with multiplier `k` (the system default is 2).
///
/// Fails only when `k` is negative, NaN, or infinite. Empty input yields
/// empty sides and an all-zero summary.
pub fn partition<M: Clone>(
    records: &[ValueRecord<M>],
    k: f64,
) -> Result<Partition<M>, FilterError> {
    Ok(OutlierPartitioner::with_k(k)?.partition(records))
}
