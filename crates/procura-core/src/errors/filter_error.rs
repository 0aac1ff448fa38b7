//! Outlier filter errors.

use super::error_code::{self, ProcuraErrorCode};

/// Errors raised by the outlier filter.
///
/// The filter performs no I/O, so the only failure is a malformed argument
/// supplied by the caller. Empty input is not an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid argument {argument}: {message}")]
    InvalidArgument { argument: String, message: String },
}

impl FilterError {
    /// Rejects a threshold multiplier that is negative, NaN, or infinite.
    pub fn invalid_multiplier(k: f64) -> Self {
        let message = if k.is_nan() {
            "multiplier is NaN".to_string()
        } else if k.is_infinite() {
            format!("multiplier must be finite, got {k}")
        } else {
            format!("multiplier must be >= 0, got {k}")
        };
        Self::InvalidArgument {
            argument: "k".to_string(),
            message,
        }
    }
}

impl ProcuraErrorCode for FilterError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_ARGUMENT
    }
}
