//! Value records handed to the outlier filter by a data-access layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default metadata shape for rows whose columns are only known at runtime.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Identifier of a business record. Integer keys from the relational store
/// and textual keys (process numbers, protocol codes) are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Stable byte encoding used for snapshot fingerprints.
    /// The tag byte keeps `Int(49)` and `Text("1")` apart.
    pub fn fingerprint_bytes(&self) -> Vec<u8> {
        match self {
            Self::Int(v) => {
                let mut out = Vec::with_capacity(9);
                out.push(0);
                out.extend_from_slice(&v.to_le_bytes());
                out
            }
            Self::Text(s) => {
                let mut out = Vec::with_capacity(s.len() + 9);
                out.push(1);
                out.extend_from_slice(&(s.len() as u64).to_le_bytes());
                out.extend_from_slice(s.as_bytes());
                out
            }
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for RecordId {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for RecordId {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One business record as seen by the outlier filter.
///
/// `value` is the only dimension the filter looks at. `metadata` is carried
/// through untouched so that outlier views can show exactly the fields the
/// caller attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord<M = Metadata> {
    pub id: RecordId,
    /// Monetary value. `None` when the source column is NULL.
    pub value: Option<f64>,
    pub metadata: M,
}

impl<M> ValueRecord<M> {
    pub fn new(id: impl Into<RecordId>, value: Option<f64>, metadata: M) -> Self {
        Self {
            id: id.into(),
            value,
            metadata,
        }
    }

    /// The value if it can take part in the statistical sample:
    /// present, finite, and strictly positive.
    pub fn sample_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite() && *v > 0.0)
    }

    /// The value as it contributes to sums. Missing and non-finite values
    /// count as zero.
    pub fn amount(&self) -> f64 {
        self.value.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

impl ValueRecord<Metadata> {
    /// Record with an empty metadata map.
    pub fn bare(id: impl Into<RecordId>, value: Option<f64>) -> Self {
        Self::new(id, value, Metadata::new())
    }
}
