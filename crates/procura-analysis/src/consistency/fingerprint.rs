//! Snapshot fingerprints via xxh3.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use procura_core::ValueRecord;

/// xxh3-64 digest of a record snapshot: record count, then every record's
/// id and value bits in input order. Metadata is not hashed; it never
/// affects classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotFingerprint(u64);

impl SnapshotFingerprint {
    pub fn of<M>(records: &[ValueRecord<M>]) -> Self {
        let mut hasher = Xxh3::new();
        hasher.update(&(records.len() as u64).to_le_bytes());
        for record in records {
            hasher.update(&record.id.fingerprint_bytes());
            match record.value {
                Some(v) => {
                    hasher.update(&[1]);
                    hasher.update(&v.to_bits().to_le_bytes());
                }
                None => hasher.update(&[0]),
            }
        }
        Self(hasher.digest())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
