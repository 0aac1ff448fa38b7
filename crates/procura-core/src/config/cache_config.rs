//! Partition cache configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the caller-owned partition cache.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether request scopes share a partition cache. Default: false.
    pub enabled: Option<bool>,
    /// Time-to-live of a cached valid id set in seconds. Default: 300.
    pub ttl_seconds: Option<u64>,
    /// Maximum number of cached valid id sets. Default: 1024.
    pub max_entries: Option<u64>,
}

impl CacheConfig {
    /// Returns whether caching is enabled, defaulting to false.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    /// Returns the effective TTL, defaulting to 300 seconds.
    pub fn effective_ttl_seconds(&self) -> u64 {
        self.ttl_seconds.unwrap_or(300)
    }

    /// Returns the effective capacity, defaulting to 1024 entries.
    pub fn effective_max_entries(&self) -> u64 {
        self.max_entries.unwrap_or(1024)
    }
}
