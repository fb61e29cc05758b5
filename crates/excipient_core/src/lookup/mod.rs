//! Read-only reference lookups consulted by the presentation layer.
//!
//! # Responsibility
//! - Map canonical pairs to incompatibility rationales.
//! - Map excipient names to descriptions.
//!
//! # Invariants
//! - Lookups never fail: missing keys return a fixed fallback string.
//! - Load failures degrade to an empty lookup; bad rows are skipped one by one.

pub mod description;
pub mod explanation;

use crate::source::table::{Table, TableError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub use description::{DescriptionLookup, NO_DESCRIPTION};
pub use explanation::{ExplanationLookup, NO_EXPLANATION};

pub type LookupResult<T> = Result<T, LookupError>;

/// Recoverable lookup-table load errors.
#[derive(Debug)]
pub enum LookupError {
    Table(TableError),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            Self::MissingColumn { table, column } => {
                write!(f, "{table} table is missing required column `{column}`")
            }
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::MissingColumn { .. } => None,
        }
    }
}

impl From<TableError> for LookupError {
    fn from(value: TableError) -> Self {
        Self::Table(value)
    }
}

fn require_column(
    table: &Table,
    table_name: &'static str,
    column: &'static str,
) -> LookupResult<usize> {
    table
        .column_index(column)
        .ok_or(LookupError::MissingColumn {
            table: table_name,
            column,
        })
}

/// True when a row carries more cells than the header declares; such a row
/// is skipped rather than guessed at.
fn has_extra_cells(table: &Table, row: usize) -> bool {
    table
        .rows
        .get(row)
        .is_some_and(|cells| cells.len() > table.header.len())
}

/// Reads one required cell, trimmed. Blank or absent cells yield `None`.
fn required_cell(table: &Table, row: usize, column: usize) -> Option<String> {
    table
        .cell(row, column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Loads a lookup table, degrading to `T::default()` on any failure.
fn load_or_default<T, F>(path: Option<&Path>, table_name: &'static str, parse: F) -> T
where
    T: Default,
    F: FnOnce(&Table) -> LookupResult<T>,
{
    let Some(path) = path else {
        warn!("event=lookup_degraded module=lookup status=warn table={table_name} reason=not_configured");
        return T::default();
    };
    match Table::load(path).map_err(LookupError::from).and_then(|table| parse(&table)) {
        Ok(lookup) => lookup,
        Err(err) => {
            warn!(
                "event=lookup_degraded module=lookup status=warn table={} error={}",
                table_name, err
            );
            T::default()
        }
    }
}
