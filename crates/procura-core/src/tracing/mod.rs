//! Observability for procura.
//! `tracing` crate with `EnvFilter`, per-crate log levels.

pub mod fields;
pub mod setup;

pub use setup::{init_tracing, DEFAULT_FILTER};
