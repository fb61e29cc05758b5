//! Grid -> relation fold.
//!
//! # Invariants
//! - Cells are visited in row-major order; among disagreeing cells for one
//!   canonical pair, the last non-zero code visited wins.
//! - A zero/blank cell never clears a finding recorded by another cell.
//! - Self-pairs (`row == col`) are skipped.

use crate::model::name::ExcipientName;
use crate::model::pair::{IncompatibilityPair, Severity};
use crate::relation::grid::{CellValue, IncompatibilityGrid};
use crate::relation::{GridError, GridResult};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{Display, Formatter};

/// What to do when the grid disagrees with itself about a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AsymmetryPolicy {
    /// Keep the last non-zero code visited and report the conflict.
    #[default]
    Flag,
    /// Fail the build.
    Reject,
}

/// One pair whose grid cells disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConflict {
    pub pair: IncompatibilityPair,
    /// Severities seen for this pair in visiting order; `None` is a zero or
    /// blank cell.
    pub observed: Vec<Option<Severity>>,
    /// Severity kept under [`AsymmetryPolicy::Flag`].
    pub resolved: Option<Severity>,
}

impl Display for GridConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let observed: Vec<&str> = self
            .observed
            .iter()
            .map(|value| value.map(Severity::label).unwrap_or("None"))
            .collect();
        write!(
            f,
            "{} observed [{}] resolved {}",
            self.pair,
            observed.join(", "),
            self.resolved.map(Severity::label).unwrap_or("None")
        )
    }
}

/// Symmetric incompatibility relation partitioned by severity.
#[derive(Debug, Clone, Default)]
pub struct IncompatibilityRelation {
    major: HashSet<IncompatibilityPair>,
    minor: HashSet<IncompatibilityPair>,
    excipients: BTreeSet<ExcipientName>,
    conflicts: Vec<GridConflict>,
}

impl IncompatibilityRelation {
    /// Folds a parsed grid into a relation.
    ///
    /// # Errors
    /// - `GridError::Asymmetric` when `policy` is `Reject` and any pair has
    ///   disagreeing cells.
    pub fn build(grid: &IncompatibilityGrid, policy: AsymmetryPolicy) -> GridResult<Self> {
        let mut observations: HashMap<IncompatibilityPair, Vec<Option<Severity>>> =
            HashMap::new();
        let mut visit_order: Vec<IncompatibilityPair> = Vec::new();
        let mut unrecognized_cells = 0usize;

        for (row, col, value) in grid.cells() {
            if value == CellValue::Unrecognized {
                unrecognized_cells += 1;
                debug!(
                    "event=grid_cell_unrecognized module=relation status=skip row={} col={}",
                    row, col
                );
            }
            let Some(pair) = IncompatibilityPair::new(row.clone(), col.clone()) else {
                continue;
            };
            let severity = Severity::from_code(value.code());
            let seen = observations.entry(pair.clone()).or_insert_with(|| {
                visit_order.push(pair);
                Vec::new()
            });
            seen.push(severity);
        }

        let mut resolved: HashMap<IncompatibilityPair, Severity> = HashMap::new();
        let mut conflicts = Vec::new();
        for pair in visit_order {
            let Some(observed) = observations.remove(&pair) else {
                continue;
            };
            let winner = observed.iter().rev().find_map(|value| *value);
            let distinct: HashSet<Option<Severity>> = observed.iter().copied().collect();
            if distinct.len() > 1 {
                conflicts.push(GridConflict {
                    pair: pair.clone(),
                    observed,
                    resolved: winner,
                });
            }
            if let Some(severity) = winner {
                resolved.insert(pair, severity);
            }
        }

        if !conflicts.is_empty() {
            match policy {
                AsymmetryPolicy::Reject => {
                    warn!(
                        "event=relation_build module=relation status=error reason=asymmetric conflicts={}",
                        conflicts.len()
                    );
                    return Err(GridError::Asymmetric(conflicts));
                }
                AsymmetryPolicy::Flag => {
                    for conflict in &conflicts {
                        warn!(
                            "event=grid_conflict module=relation status=warn resolved={}",
                            conflict.resolved.map(Severity::label).unwrap_or("None")
                        );
                        debug!("event=grid_conflict module=relation detail={}", conflict);
                    }
                }
            }
        }

        if unrecognized_cells > 0 {
            warn!(
                "event=grid_cells_unrecognized module=relation status=warn count={}",
                unrecognized_cells
            );
        }

        let mut relation = Self {
            excipients: grid.excipients(),
            conflicts,
            ..Self::default()
        };
        for (pair, severity) in resolved {
            relation.insert(pair, severity);
        }

        info!(
            "event=relation_build module=relation status=ok excipients={} major={} minor={} conflicts={}",
            relation.excipients.len(),
            relation.major.len(),
            relation.minor.len(),
            relation.conflicts.len()
        );
        Ok(relation)
    }

    /// Builds a relation directly from pair lists.
    ///
    /// A pair listed in both lists is kept as major. The excipient universe is
    /// every name mentioned by a pair.
    pub fn from_pairs<M, N>(major: M, minor: N) -> Self
    where
        M: IntoIterator<Item = IncompatibilityPair>,
        N: IntoIterator<Item = IncompatibilityPair>,
    {
        let mut relation = Self::default();
        for pair in minor {
            relation.insert(pair, Severity::Minor);
        }
        for pair in major {
            relation.insert(pair, Severity::Major);
        }
        relation
    }

    fn insert(&mut self, pair: IncompatibilityPair, severity: Severity) {
        self.excipients.insert(pair.first().clone());
        self.excipients.insert(pair.second().clone());
        match severity {
            Severity::Major => {
                self.minor.remove(&pair);
                self.major.insert(pair);
            }
            Severity::Minor => {
                self.major.remove(&pair);
                self.minor.insert(pair);
            }
        }
    }

    /// Classifies one pair: major first, then minor.
    pub fn severity_of(&self, pair: &IncompatibilityPair) -> Option<Severity> {
        if self.major.contains(pair) {
            Some(Severity::Major)
        } else if self.minor.contains(pair) {
            Some(Severity::Minor)
        } else {
            None
        }
    }

    pub fn major(&self) -> &HashSet<IncompatibilityPair> {
        &self.major
    }

    pub fn minor(&self) -> &HashSet<IncompatibilityPair> {
        &self.minor
    }

    /// Sorted, deduplicated excipient universe.
    pub fn excipient_list(&self) -> Vec<ExcipientName> {
        self.excipients.iter().cloned().collect()
    }

    pub fn contains_excipient(&self, name: &str) -> bool {
        self.excipients.contains(name.trim())
    }

    /// Cell disagreements detected while building under `Flag`.
    pub fn conflicts(&self) -> &[GridConflict] {
        &self.conflicts
    }
}
