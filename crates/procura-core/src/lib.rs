//! # procura-core
//!
//! Core types, errors, configuration, and tracing for the procura
//! outlier filter. Everything the analysis crate shares with its callers
//! lives here: the record shape, the error taxonomy, the layered config,
//! and the logging setup.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use types::{Metadata, RecordId, ValueRecord};
