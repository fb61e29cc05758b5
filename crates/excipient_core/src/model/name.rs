//! Excipient name normalization.
//!
//! # Invariants
//! - Normalization only trims leading/trailing whitespace; case is preserved.
//! - `ExcipientName::new(ExcipientName::new(x).as_str()) == ExcipientName::new(x)`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// Normalizes one raw label from any source (grid, lookup table, selection).
pub fn normalize_name(raw: &str) -> &str {
    raw.trim()
}

/// Normalized excipient name.
///
/// Grid labels, lookup-table keys and user selections all pass through this
/// type, so two names compare equal iff their trimmed text is equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExcipientName(String);

impl ExcipientName {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_name(raw.as_ref()).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the name is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for ExcipientName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExcipientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ExcipientName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExcipientName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ExcipientName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for ExcipientName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExcipientName {
    // Why: wire input is untrusted; re-normalize so deserialized names obey
    // the same trim invariant as every other ingestion point.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

/// Normalizes an ordered selection, preserving order and duplicates.
pub fn normalize_selection<I, S>(raw: I) -> Vec<ExcipientName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter().map(ExcipientName::new).collect()
}
