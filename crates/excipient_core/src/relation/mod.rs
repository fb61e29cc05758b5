//! Incompatibility relation built from the pairwise grid.
//!
//! # Responsibility
//! - Parse the grid table into labelled cell codes.
//! - Fold every cell into one symmetric, severity-partitioned relation.
//!
//! # Invariants
//! - A grid that cannot be parsed is a fatal error, never an empty relation.
//! - Major and minor pair sets are disjoint and contain no self-pairs.
//! - The relation is immutable once built and safe to share across threads.

pub mod builder;
pub mod grid;

use crate::source::table::TableError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use builder::{AsymmetryPolicy, GridConflict, IncompatibilityRelation};
pub use grid::{CellValue, GridAxis, IncompatibilityGrid};

pub type GridResult<T> = Result<T, GridError>;

/// Fatal grid load/build errors.
#[derive(Debug)]
pub enum GridError {
    Table(TableError),
    NoLabels,
    MissingLabel { axis: GridAxis, position: usize },
    DuplicateColumn(String),
    Asymmetric(Vec<GridConflict>),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "incompatibility grid unreadable: {err}"),
            Self::NoLabels => write!(f, "incompatibility grid declares no excipients"),
            Self::MissingLabel { axis, position } => {
                write!(f, "incompatibility grid {axis} {position} has an empty label")
            }
            Self::DuplicateColumn(label) => {
                write!(f, "incompatibility grid repeats column `{label}`")
            }
            Self::Asymmetric(conflicts) => {
                write!(
                    f,
                    "incompatibility grid is asymmetric for {} pair(s)",
                    conflicts.len()
                )?;
                if let Some(first) = conflicts.first() {
                    write!(f, "; first: {first}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::NoLabels
            | Self::MissingLabel { .. }
            | Self::DuplicateColumn(_)
            | Self::Asymmetric(_) => None,
        }
    }
}

impl From<TableError> for GridError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}
