//! Structured field names for procura log events.
//!
//! Events carry these names as field identifiers so log queries can match
//! them across crates. Every computed partition logs the full summary with
//! the `partition_*` fields.

/// Scope label of the request that resolved a dataset.
pub const SCOPE: &str = "scope";

/// Logical dataset name inside a scope.
pub const DATASET: &str = "dataset";

/// Multiplier `k` the partition was computed with.
pub const PARTITION_MULTIPLIER: &str = "partition_multiplier";

/// Sample mean.
pub const PARTITION_MEAN: &str = "partition_mean";

/// Population standard deviation of the sample.
pub const PARTITION_STDDEV: &str = "partition_stddev";

/// `mean + k * stddev`.
pub const PARTITION_THRESHOLD: &str = "partition_threshold";

/// Number of strictly positive values in the sample.
pub const PARTITION_SAMPLE_SIZE: &str = "partition_sample_size";

pub const PARTITION_TOTAL_RECORDS: &str = "partition_total_records";
pub const PARTITION_VALID_COUNT: &str = "partition_valid_count";
pub const PARTITION_OUTLIER_COUNT: &str = "partition_outlier_count";

/// Fingerprint of the snapshot being resolved.
pub const SNAPSHOT_FINGERPRINT: &str = "snapshot_fingerprint";

/// Fingerprint the scope resolved first for a dataset.
pub const SNAPSHOT_EXPECTED: &str = "snapshot_expected";

/// Fingerprint of the diverging snapshot.
pub const SNAPSHOT_FOUND: &str = "snapshot_found";

/// Outlier count of the first resolution, logged on divergence.
pub const FIRST_OUTLIER_COUNT: &str = "first_outlier_count";
