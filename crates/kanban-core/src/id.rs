#![forbid(unsafe_code)]

//! Caller-supplied identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for columns, items, and sentinel drop targets.
///
/// The engine never allocates identifiers; it only compares them. Numeric
/// identifiers from a host are accepted through `From<u64>` and compared by
/// their decimal rendering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(String);

impl UniqueId {
    /// Create an identifier from any string-like value.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UniqueId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for UniqueId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&UniqueId> for UniqueId {
    fn from(value: &UniqueId) -> Self {
        value.clone()
    }
}

impl From<u64> for UniqueId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for UniqueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UniqueId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UniqueId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
