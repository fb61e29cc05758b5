//! Labelled incompatibility grid.
//!
//! The first header cell is the corner label and is ignored. Remaining
//! header cells are column labels; the first cell of each row is its row
//! label. Labels are normalized on ingestion.

use crate::model::name::ExcipientName;
use crate::relation::{GridError, GridResult};
use crate::source::table::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter};
use std::path::Path;

static CELL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?(\d+)(?:\.0*)?$").expect("valid cell code regex"));

/// Grid axis, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Row,
    Column,
}

impl Display for GridAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// Decoded value of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Blank,
    Code(i64),
    Unrecognized,
}

impl CellValue {
    /// Parses raw cell text. Integral numerics such as `2`, `2.0` or ` 1 `
    /// are codes; empty text and `nan` are blank.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Self::Blank;
        }
        CELL_CODE_RE
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse::<i64>().ok())
            .map(Self::Code)
            .unwrap_or(Self::Unrecognized)
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Code(code) => code,
            Self::Blank | Self::Unrecognized => 0,
        }
    }
}

/// Parsed grid: row labels, column labels and one cell per (row, column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompatibilityGrid {
    rows: Vec<ExcipientName>,
    columns: Vec<ExcipientName>,
    cells: Vec<Vec<CellValue>>,
}

impl IncompatibilityGrid {
    /// Reads and parses a grid file.
    pub fn load(path: &Path) -> GridResult<Self> {
        let table = Table::load(path)?;
        Self::from_table(&table)
    }

    /// Parses a grid from its tabular form.
    ///
    /// # Errors
    /// - `Table(RaggedRow)` when a row has more cells than the header.
    /// - `MissingLabel` when a row or column label is blank.
    /// - `DuplicateColumn` when two column labels normalize to the same name.
    /// - `NoLabels` when neither axis names any excipient.
    pub fn from_table(table: &Table) -> GridResult<Self> {
        table.ensure_no_long_rows()?;

        let mut columns = Vec::with_capacity(table.header.len().saturating_sub(1));
        let mut seen = HashSet::new();
        for (position, raw) in table.header.iter().enumerate().skip(1) {
            let label = ExcipientName::new(raw);
            if label.is_empty() {
                return Err(GridError::MissingLabel {
                    axis: GridAxis::Column,
                    position,
                });
            }
            if !seen.insert(label.clone()) {
                return Err(GridError::DuplicateColumn(label.into_string()));
            }
            columns.push(label);
        }

        let mut rows = Vec::with_capacity(table.rows.len());
        let mut cells = Vec::with_capacity(table.rows.len());
        for (index, row) in table.rows.iter().enumerate() {
            let label = ExcipientName::new(row.first().map(String::as_str).unwrap_or(""));
            if label.is_empty() {
                return Err(GridError::MissingLabel {
                    axis: GridAxis::Row,
                    position: index + 1,
                });
            }
            let values = (0..columns.len())
                .map(|col| {
                    row.get(col + 1)
                        .map(|raw| CellValue::parse(raw))
                        .unwrap_or(CellValue::Blank)
                })
                .collect();
            rows.push(label);
            cells.push(values);
        }

        if rows.is_empty() && columns.is_empty() {
            return Err(GridError::NoLabels);
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    pub fn rows(&self) -> &[ExcipientName] {
        &self.rows
    }

    pub fn columns(&self) -> &[ExcipientName] {
        &self.columns
    }

    /// Sorted union of row and column labels.
    pub fn excipients(&self) -> BTreeSet<ExcipientName> {
        self.rows.iter().chain(self.columns.iter()).cloned().collect()
    }

    /// Visits every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (&ExcipientName, &ExcipientName, CellValue)> {
        self.rows.iter().zip(self.cells.iter()).flat_map(move |(row, values)| {
            self.columns
                .iter()
                .zip(values.iter())
                .map(move |(col, value)| (row, col, *value))
        })
    }
}
