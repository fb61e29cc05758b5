//! Header + rows table decoded from JSON or delimited text.
//!
//! Rows are kept as decoded, whatever their length. Shape rules belong to
//! the consumer: the grid rejects rows longer than the header, lookups skip
//! them one at a time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BYTE_ORDER_MARK: char = '\u{feff}';

pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while reading or decoding a table.
#[derive(Debug)]
pub enum TableError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Csv(csv::Error),
    UnsupportedDelimiter(char),
    Empty,
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read table `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid JSON table: {err}"),
            Self::Csv(err) => write!(f, "invalid delimited table: {err}"),
            Self::UnsupportedDelimiter(c) => {
                write!(f, "delimiter {c:?} is not a single ASCII character")
            }
            Self::Empty => write!(f, "table has no header row"),
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row} has {actual} cells but the header declares {expected}"
            ),
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::UnsupportedDelimiter(_) | Self::Empty | Self::RaggedRow { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TableError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for TableError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Text encodings accepted by [`Table::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Delimited(char),
}

impl TableFormat {
    /// Picks a format from a file extension. Unknown extensions fall back to
    /// comma-separated text.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Self::Json,
            Some("tsv") | Some("txt") => Self::Delimited('\t'),
            _ => Self::Delimited(','),
        }
    }
}

/// In-memory table: one header row plus data rows of any length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table; only an empty header is rejected.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> TableResult<Self> {
        let table = Self { header, rows };
        table.validate()?;
        Ok(table)
    }

    /// Reads a table from disk, choosing the decoder by extension.
    pub fn load(path: &Path) -> TableResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match TableFormat::from_path(path) {
            TableFormat::Json => Self::from_json_str(&text),
            TableFormat::Delimited(delimiter) => Self::from_delimited_str(&text, delimiter),
        }
    }

    /// Decodes `{"header": [...], "rows": [[...]]}`.
    pub fn from_json_str(text: &str) -> TableResult<Self> {
        let mut table: Table = serde_json::from_str(strip_bom(text))?;
        if let Some(first) = table.header.first_mut() {
            if first.starts_with(BYTE_ORDER_MARK) {
                *first = strip_bom(first).to_string();
            }
        }
        table.validate()?;
        Ok(table)
    }

    /// Decodes delimited text with standard double-quote quoting. Quoted
    /// fields may span lines; rows may differ in length. A leading byte-order
    /// mark is dropped and whitespace-only lines are skipped.
    pub fn from_delimited_str(text: &str, delimiter: char) -> TableResult<Self> {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(TableError::UnsupportedDelimiter(delimiter))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(strip_bom(text).as_bytes());

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let mut records = records.into_iter();
        let header = records.next().ok_or(TableError::Empty)?;
        Self::new(header, records.collect())
    }

    /// Returns the index of a header column, comparing trimmed labels.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|label| strip_bom(label).trim() == name.trim())
    }

    /// Returns one cell, treating cells past the end of a short row as absent.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Rejects any row with more cells than the header.
    pub fn ensure_no_long_rows(&self) -> TableResult<()> {
        match self.long_rows().next() {
            Some(row) => Err(TableError::RaggedRow {
                row: row + 1,
                expected: self.header.len(),
                actual: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }

    /// Zero-based indices of rows with more cells than the header.
    pub fn long_rows(&self) -> impl Iterator<Item = usize> + '_ {
        let width = self.header.len();
        self.rows
            .iter()
            .enumerate()
            .filter(move |(_, cells)| cells.len() > width)
            .map(|(index, _)| index)
    }

    fn validate(&self) -> TableResult<()> {
        if self.header.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(())
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
}
