//! Caller-owned partition cache using moka.
//!
//! TinyLFU admission, bounded capacity, per-entry TTL. Keyed by snapshot
//! fingerprint and multiplier, so the cache can only ever return what a
//! fresh computation would have returned.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use procura_core::config::CacheConfig;

use super::{SnapshotFingerprint, ValidIdSet};
use crate::statistics::Multiplier;

/// Cache key: the snapshot and the `k` it was classified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub fingerprint: SnapshotFingerprint,
    pub multiplier_bits: u64,
}

impl CacheKey {
    pub fn new(fingerprint: SnapshotFingerprint, multiplier: Multiplier) -> Self {
        Self {
            fingerprint,
            multiplier_bits: multiplier.to_bits(),
        }
    }
}

/// Shared valid-id-set cache. Cloning is cheap and clones share entries.
#[derive(Clone)]
pub struct PartitionCache {
    cache: Cache<CacheKey, Arc<ValidIdSet>>,
}

impl PartitionCache {
    /// Create a cache with the given capacity and time-to-live.
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(max_entries).time_to_live(ttl).build();
        Self { cache }
    }

    /// Cache from the `[cache]` config section, or `None` when disabled.
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config.effective_enabled().then(|| {
            Self::new(
                config.effective_max_entries(),
                Duration::from_secs(config.effective_ttl_seconds()),
            )
        })
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ValidIdSet>> {
        self.cache.get(key)
    }

    /// Return the cached set for `key`, or compute and insert it.
    pub fn get_or_compute(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> ValidIdSet,
    ) -> Arc<ValidIdSet> {
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(snapshot_fingerprint = %key.fingerprint, "partition cache hit");
            return hit;
        }
        tracing::trace!(snapshot_fingerprint = %key.fingerprint, "partition cache miss");
        let set = Arc::new(compute());
        self.cache.insert(key, Arc::clone(&set));
        set
    }

    /// Number of entries currently in the cache (eventually consistent).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl std::fmt::Debug for PartitionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
