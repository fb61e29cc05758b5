//! Pairwise compatibility evaluation.
//!
//! # Invariants
//! - Findings follow 2-combination order of the input selection, not
//!   severity or alphabetical order.
//! - `n` selected names produce at most `C(n, 2)` findings.
//! - Two positions holding the same name never produce a finding.

use crate::model::name::ExcipientName;
use crate::model::pair::{Finding, IncompatibilityPair, Severity};
use crate::relation::IncompatibilityRelation;
use serde::Serialize;
use std::collections::HashSet;

/// Overall outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing was selected; distinct from `Compatible`.
    NoExcipients,
    Compatible,
    Incompatible,
}

impl Verdict {
    pub fn from_findings(excipients: &[ExcipientName], findings: &[Finding]) -> Self {
        if excipients.is_empty() {
            Self::NoExcipients
        } else if findings.is_empty() {
            Self::Compatible
        } else {
            Self::Incompatible
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoExcipients => "No excipients selected.",
            Self::Compatible => "This formulation is COMPATIBLE.",
            Self::Incompatible => "This formulation is INCOMPATIBLE.",
        }
    }
}

/// Enumerates every 2-combination of `excipients` in input order.
///
/// Self-pairs (equal names at different positions) are yielded as `None`.
pub fn pair_combinations(
    excipients: &[ExcipientName],
) -> impl Iterator<Item = Option<IncompatibilityPair>> + '_ {
    excipients.iter().enumerate().flat_map(move |(i, a)| {
        excipients[i + 1..]
            .iter()
            .map(move |b| IncompatibilityPair::new(a.clone(), b.clone()))
    })
}

/// Classifies every pair of a selection against explicit major/minor sets.
pub fn evaluate_with_sets(
    excipients: &[ExcipientName],
    major: &HashSet<IncompatibilityPair>,
    minor: &HashSet<IncompatibilityPair>,
) -> Vec<Finding> {
    pair_combinations(excipients)
        .flatten()
        .filter_map(|pair| {
            if major.contains(&pair) {
                Some(Finding::new(pair, Severity::Major))
            } else if minor.contains(&pair) {
                Some(Finding::new(pair, Severity::Minor))
            } else {
                None
            }
        })
        .collect()
}

/// Classifies every pair of a selection against a relation.
pub fn evaluate(excipients: &[ExcipientName], relation: &IncompatibilityRelation) -> Vec<Finding> {
    evaluate_with_sets(excipients, relation.major(), relation.minor())
}

/// Symmetric `n x n` code matrix for a selection: `2` major, `1` minor,
/// `0` compatible. The diagonal is always `0`.
pub fn compatibility_matrix(
    excipients: &[ExcipientName],
    relation: &IncompatibilityRelation,
) -> Vec<Vec<u8>> {
    let size = excipients.len();
    let mut matrix = vec![vec![0u8; size]; size];
    for i in 0..size {
        for j in (i + 1)..size {
            let code = IncompatibilityPair::new(excipients[i].clone(), excipients[j].clone())
                .and_then(|pair| relation.severity_of(&pair))
                .map(Severity::code)
                .unwrap_or(0);
            matrix[i][j] = code;
            matrix[j][i] = code;
        }
    }
    matrix
}
