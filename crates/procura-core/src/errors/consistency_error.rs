//! Consistency-scope errors.

use super::error_code::{self, ProcuraErrorCode};
use super::FilterError;

/// Errors raised while resolving valid id sets inside one request scope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// The same logical dataset was requested twice in one scope, but the
    /// two record snapshots hash differently.
    #[error("Dataset {dataset} diverged within one scope: expected snapshot {expected:016x}, found {found:016x}")]
    SnapshotDiverged {
        dataset: String,
        expected: u64,
        found: u64,
    },
}

impl ProcuraErrorCode for ConsistencyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Filter(e) => e.error_code(),
            Self::SnapshotDiverged { .. } => error_code::SNAPSHOT_DIVERGED,
        }
    }
}
