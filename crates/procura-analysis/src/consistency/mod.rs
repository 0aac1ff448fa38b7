//! Dashboard consistency: one valid id set per dataset per request.
//!
//! Every widget of one dashboard response obtains its valid id set from the
//! same [`ConsistencyScope`], which holds the single request-scoped
//! multiplier and remembers the snapshot fingerprint of every dataset it
//! has resolved. Asking for the same dataset again with a different record
//! snapshot is a [`ConsistencyError::SnapshotDiverged`].
//!
//! [`PartitionCache`] is an optional memoization boundary owned by the
//! caller. Keys are `(snapshot fingerprint, k)`, so a hit is always
//! identical to recomputing.
//!
//! [`ConsistencyError::SnapshotDiverged`]: procura_core::errors::ConsistencyError::SnapshotDiverged

pub mod cache;
pub mod fingerprint;
pub mod scope;
pub mod valid_set;

pub use cache::{CacheKey, PartitionCache};
pub use fingerprint::SnapshotFingerprint;
pub use scope::ConsistencyScope;
pub use valid_set::ValidIdSet;
