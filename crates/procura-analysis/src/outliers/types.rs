//! Core types for outlier partitioning.

use std::fmt;

use serde::{Deserialize, Serialize};

use procura_core::{RecordId, ValueRecord};

/// Statistical summary of one partition call.
///
/// `valid_count + outlier_count == total_records` and
/// `threshold == mean + multiplier * stddev` always hold. With an empty
/// sample, mean, stddev and threshold are all zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalSummary {
    pub mean: f64,
    pub stddev: f64,
    pub threshold: f64,
    /// The `k` the threshold was derived from.
    pub multiplier: f64,
    /// Records with a strictly positive finite value.
    pub sample_size: usize,
    pub total_records: usize,
    pub valid_count: usize,
    pub outlier_count: usize,
}

impl StatisticalSummary {
    /// Whether the summary has any outliers at all.
    pub fn has_outliers(&self) -> bool {
        self.outlier_count > 0
    }

    /// Fraction of records classified as outliers, 0.0 for empty input.
    pub fn outlier_ratio(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.outlier_count as f64 / self.total_records as f64
        }
    }
}

/// Stable partition of one record batch.
///
/// Both lists preserve input order. Outliers keep their full metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition<M> {
    pub valid: Vec<ValueRecord<M>>,
    pub outliers: Vec<ValueRecord<M>>,
    pub summary: StatisticalSummary,
}

impl<M> Partition<M> {
    /// Ids of the valid records, in input order.
    pub fn valid_ids(&self) -> impl Iterator<Item = &RecordId> + '_ {
        self.valid.iter().map(|r| &r.id)
    }

    /// Ids of the outlier records, in input order.
    pub fn outlier_ids(&self) -> impl Iterator<Item = &RecordId> + '_ {
        self.outliers.iter().map(|r| &r.id)
    }

    /// Total number of records across both sides.
    pub fn len(&self) -> usize {
        self.valid.len() + self.outliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalized deviation score in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationScore(f64);

impl DeviationScore {
    /// Create a new deviation score, clamped to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::zero();
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Map a z-score onto [0.0, 1.0]: `k` maps to 0.0, `3k` to 1.0.
    /// A zero multiplier uses the span [0, 3].
    pub fn from_z_score(z: f64, k: f64) -> Self {
        let span = if k > 0.0 { 2.0 * k } else { 3.0 };
        Self::new((z - k) / span)
    }

    /// Get the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Zero deviation.
    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for DeviationScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// How far past the threshold an outlier lies, as a multiple of the
/// threshold itself.
///
/// Implausible procurement amounts are usually data-entry slips: one or two
/// extra digits put a value 10x or 100x above its peers. The tiers follow
/// those orders of magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceTier {
    /// At least 10x the threshold.
    Critical,
    /// At least 3x.
    High,
    /// At least 1.5x.
    Moderate,
    /// Just over the threshold.
    Low,
}

impl SignificanceTier {
    /// Classify an outlier value against the threshold it exceeded.
    /// A non-positive threshold places every positive value in `Critical`.
    pub fn from_threshold_ratio(value: f64, threshold: f64) -> Self {
        let ratio = if threshold > 0.0 {
            value / threshold
        } else {
            f64::INFINITY
        };
        if ratio >= 10.0 {
            Self::Critical
        } else if ratio >= 3.0 {
            Self::High
        } else if ratio >= 1.5 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for SignificanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
