//! Canonical incompatibility pairs, severities and findings.
//!
//! # Invariants
//! - `IncompatibilityPair` stores its two names in ascending order, so
//!   `{a, b}` and `{b, a}` hash and compare identically.
//! - A pair never holds the same name twice.

use crate::model::name::ExcipientName;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Severity class of one documented incompatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Major,
}

impl Severity {
    /// Maps a grid cell code to a severity. `2` is major, `1` is minor and
    /// every other code means no finding.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::Major),
            1 => Some(Self::Minor),
            _ => None,
        }
    }

    /// Grid/matrix code for this severity.
    pub fn code(self) -> u8 {
        match self {
            Self::Major => 2,
            Self::Minor => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unordered pair of two distinct excipient names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IncompatibilityPair {
    first: ExcipientName,
    second: ExcipientName,
}

impl IncompatibilityPair {
    /// Builds the canonical pair for two names.
    ///
    /// Returns `None` when both names are equal after normalization, since a
    /// substance is never incompatible with itself.
    pub fn new(a: impl Into<ExcipientName>, b: impl Into<ExcipientName>) -> Option<Self> {
        let a = a.into();
        let b = b.into();
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Lexicographically smaller name.
    pub fn first(&self) -> &ExcipientName {
        &self.first
    }

    /// Lexicographically larger name.
    pub fn second(&self) -> &ExcipientName {
        &self.second
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first.as_str() == name || self.second.as_str() == name
    }
}

impl Display for IncompatibilityPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// One incompatibility detected in a formulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Finding {
    pub pair: IncompatibilityPair,
    pub severity: Severity,
}

impl Finding {
    pub fn new(pair: IncompatibilityPair, severity: Severity) -> Self {
        Self { pair, severity }
    }
}
