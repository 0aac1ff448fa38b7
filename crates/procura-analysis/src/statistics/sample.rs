//! Mean and population standard deviation over a sample.

use serde::{Deserialize, Serialize};

use procura_core::errors::FilterError;

use super::Multiplier;

/// Mean and population standard deviation of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub mean: f64,
    pub stddev: f64,
    /// Number of values in the sample.
    pub count: usize,
}

impl SampleStatistics {
    /// Compute mean and population stddev. Empty input yields all zeros.
    ///
    /// Values are divided by a power of two near the largest magnitude
    /// before summing, so any list of finite values yields a finite mean
    /// and stddev. Scaling by a power of two is exact for normal numbers.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let scale = power_of_two_scale(values);
        let n = values.len() as f64;
        let mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|v| (v / scale - mean).powi(2))
            .sum::<f64>()
            / n;

        Self {
            mean: mean * scale,
            stddev: variance.sqrt() * scale,
            count: values.len(),
        }
    }

    /// Upper threshold `mean + k * stddev`, saturating at `f64::MAX`.
    ///
    /// No finite value exceeds either bound, so saturation never changes a
    /// classification.
    pub fn threshold(&self, k: Multiplier) -> f64 {
        (self.mean + k.value() * self.stddev).min(f64::MAX)
    }
}

/// Upper threshold `mean + k * stddev` for a raw multiplier.
///
/// Rejects a negative, NaN, or infinite `k` instead of clamping it.
pub fn threshold(mean: f64, stddev: f64, k: f64) -> Result<f64, FilterError> {
    let k = Multiplier::new(k)?;
    Ok(SampleStatistics {
        mean,
        stddev,
        count: 0,
    }
    .threshold(k))
}

/// `2^e` with `2^e <= max |v| < 2^(e+1)`, kept well inside the normal range.
fn power_of_two_scale(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    if max == 0.0 || !max.is_finite() {
        return 1.0;
    }
    let exponent = max.log2().floor().clamp(-1000.0, 1000.0) as i32;
    2f64.powi(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sample_is_all_zero() {
        let stats = SampleStatistics::compute(&[]);
        assert_eq!(stats, SampleStatistics::default());
        assert_eq!(stats.threshold(Multiplier::DEFAULT), 0.0);
    }

    #[test]
    fn population_not_sample_stddev() {
        let stats = SampleStatistics::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.stddev, 2.0);
        assert_eq!(stats.count, 8);
    }

    #[test]
    fn single_value_has_zero_stddev() {
        let stats = SampleStatistics::compute(&[42.0]);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.stddev, 0.0);
    }

    #[test]
    fn huge_values_stay_finite() {
        let stats = SampleStatistics::compute(&[1e308, 1e308]);
        assert_eq!(stats.mean, 1e308);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.threshold(Multiplier::new(0.0).unwrap()), 1e308);

        let mut values = vec![1e150; 50];
        values.push(1e200);
        let stats = SampleStatistics::compute(&values);
        assert!(stats.mean.is_finite() && stats.stddev.is_finite());
        let expected_std = 1e200 * 50f64.sqrt() / 51.0;
        assert!((stats.stddev - expected_std).abs() / expected_std < 1e-12);
        assert!(stats.threshold(Multiplier::DEFAULT) < 1e200);
    }

    #[test]
    fn threshold_saturates_at_max() {
        let stats = SampleStatistics::compute(&[f64::MAX, 1.0]);
        assert!(stats.stddev.is_finite());
        assert_eq!(stats.threshold(Multiplier::DEFAULT), f64::MAX);
    }

    #[test]
    fn tiny_values_keep_their_spread() {
        let stats = SampleStatistics::compute(&[2e-300, 4e-300, 4e-300, 4e-300, 5e-300, 5e-300, 7e-300, 9e-300]);
        assert!((stats.mean - 5e-300).abs() / 5e-300 < 1e-12);
        assert!((stats.stddev - 2e-300).abs() / 2e-300 < 1e-12);
    }

    #[test]
    fn threshold_formula() {
        assert_eq!(threshold(10.0, 3.0, 2.0).unwrap(), 16.0);
        assert_eq!(threshold(10.0, 3.0, 0.0).unwrap(), 10.0);
    }

    #[test]
    fn threshold_rejects_bad_multipliers() {
        assert!(threshold(1.0, 1.0, -0.5).is_err());
        assert!(threshold(1.0, 1.0, f64::NAN).is_err());
        assert!(threshold(1.0, 1.0, f64::INFINITY).is_err());
    }
}
