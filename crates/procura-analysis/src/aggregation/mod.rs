//! In-memory dashboard aggregations over a valid id set.
//!
//! Totals, time-series evolution, distribution by category and critical
//! items, all restricted to the ids of one [`ValidIdSet`] so that widgets of
//! the same response reconcile.
//!
//! [`ValidIdSet`]: crate::consistency::ValidIdSet

pub mod dashboard;
pub mod types;

pub use dashboard::DashboardAggregator;
pub use types::{CategoryShare, MetricTotal, Reconciliation};
