//! Shared record types.

pub mod record;

pub use record::{Metadata, RecordId, ValueRecord};
