//! Outlier filter configuration.

use serde::{Deserialize, Serialize};

/// System default for the threshold multiplier `k`.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Configuration for the outlier filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutlierConfig {
    /// Threshold multiplier `k` in `mean + k * stddev`. Default: 2.0.
    pub multiplier: Option<f64>,
}

impl OutlierConfig {
    /// Returns the effective multiplier, defaulting to 2.0.
    pub fn effective_multiplier(&self) -> f64 {
        self.multiplier.unwrap_or(DEFAULT_MULTIPLIER)
    }
}
