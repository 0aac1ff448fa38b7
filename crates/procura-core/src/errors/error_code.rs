//! ProcuraErrorCode trait for API-boundary conversion.

/// Every error enum implements this to expose a stable, machine-readable
/// code that HTTP handlers can map without matching on message text.
pub trait ProcuraErrorCode {
    /// Returns the error code string (e.g., "INVALID_ARGUMENT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the API boundary.
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const SNAPSHOT_DIVERGED: &str = "SNAPSHOT_DIVERGED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
