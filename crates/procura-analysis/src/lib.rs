//! # procura-analysis
//!
//! Outlier filtering for procurement dashboards.
//!
//! Records are classified as valid or outlier with a single rule: a strictly
//! positive value above `mean + k * stddev` (population stddev over every
//! strictly positive value of the batch) is an outlier. Everything else,
//! including zero, negative and missing values, is valid.
//!
//! - [`statistics`]: sample mean, population stddev, the validated multiplier.
//! - [`outliers`]: the pure partitioner and its summary.
//! - [`consistency`]: request scopes and the caller-owned partition cache.
//!   [`ConsistencyScope`] is the one place dashboard widgets obtain a valid
//!   id set from, so that every widget of a response agrees.
//! - [`aggregation`]: in-memory totals, evolution, distribution and
//!   critical items over a valid id set.
//! - [`inspection`]: outlier details with formatted monetary values.
//!
//! ```
//! use procura_analysis::outliers::partition;
//! use procura_core::ValueRecord;
//!
//! let mut records: Vec<ValueRecord> = (0..7).map(|i| ValueRecord::bare(i, Some(100.0))).collect();
//! records.push(ValueRecord::bare(7, Some(10_000.0)));
//!
//! let result = partition(&records, 2.0).unwrap();
//! assert_eq!(result.outliers.len(), 1);
//! assert_eq!(result.summary.valid_count, 7);
//! ```

pub mod aggregation;
pub mod consistency;
pub mod inspection;
pub mod outliers;
pub mod statistics;

pub use aggregation::DashboardAggregator;
pub use consistency::{ConsistencyScope, PartitionCache, SnapshotFingerprint, ValidIdSet};
pub use inspection::{inspect, OutlierReport, ValueFormatter};
pub use outliers::{partition, OutlierPartitioner, Partition, StatisticalSummary};
pub use statistics::{Multiplier, SampleStatistics};
