//! Outlier inspection: the records a dashboard excluded, with their full
//! metadata and a human-readable amount.

pub mod detail;
pub mod format;

pub use detail::{inspect, OutlierDetail, OutlierReport};
pub use format::ValueFormatter;
