//! Error handling for procura.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod consistency_error;
pub mod error_code;
pub mod filter_error;

pub use config_error::ConfigError;
pub use consistency_error::ConsistencyError;
pub use error_code::ProcuraErrorCode;
pub use filter_error::FilterError;
