//! Outlier partitioning: mean + k·σ over strictly positive values.
//!
//! Records with a missing, zero, negative, or non-finite value never enter
//! the sample and are always valid. Every other record is valid when its
//! value is `<= mean + k * stddev` and an outlier otherwise.
//!
//! Known limitation: in a small sample a single extreme value inflates its
//! own stddev and may stay under the threshold (`[10, 10, 10, 1000]` with
//! `k = 2` flags nothing). This is inherent to the rule.

pub mod partitioner;
pub mod types;

pub use partitioner::{partition, OutlierPartitioner};
pub use types::{DeviationScore, Partition, SignificanceTier, StatisticalSummary};
