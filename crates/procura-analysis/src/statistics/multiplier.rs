//! The threshold multiplier `k`.

use std::fmt;

use serde::{Deserialize, Serialize};

use procura_core::config::outlier_config::DEFAULT_MULTIPLIER;
use procura_core::config::OutlierConfig;
use procura_core::errors::FilterError;

/// A finite, non-negative threshold multiplier.
///
/// Constructing one is the only validation point for `k`; everything
/// downstream takes a `Multiplier` rather than a bare `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Multiplier(f64);

impl Multiplier {
    /// The system default, `k = 2`.
    pub const DEFAULT: Multiplier = Multiplier(DEFAULT_MULTIPLIER);

    /// Validate `k`. Negative, NaN, and infinite values are rejected.
    pub fn new(k: f64) -> Result<Self, FilterError> {
        if !k.is_finite() || k < 0.0 {
            return Err(FilterError::invalid_multiplier(k));
        }
        // -0.0 passes the check above; store it as +0.0 so equal
        // multipliers always share cache keys.
        Ok(Self(if k == 0.0 { 0.0 } else { k }))
    }

    /// Multiplier from the `[outliers]` config section.
    pub fn from_config(config: &OutlierConfig) -> Result<Self, FilterError> {
        Self::new(config.effective_multiplier())
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Bit pattern used as part of cache keys.
    pub fn to_bits(self) -> u64 {
        self.0.to_bits()
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Multiplier {
    type Error = FilterError;

    fn try_from(k: f64) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl From<Multiplier> for f64 {
    fn from(k: Multiplier) -> Self {
        k.0
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
