//! Excipient -> description lookup.

use crate::lookup::{
    has_extra_cells, load_or_default, require_column, required_cell, LookupResult,
};
use crate::model::name::ExcipientName;
use crate::source::table::Table;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Fallback returned for excipients without a description.
pub const NO_DESCRIPTION: &str = "No description available.";

const TABLE_NAME: &str = "description";
const COLUMN_EXCIPIENT: &str = "Excipient";
const COLUMN_DESCRIPTION: &str = "Description";

/// Descriptions keyed by normalized excipient name.
#[derive(Debug, Clone, Default)]
pub struct DescriptionLookup {
    descriptions: HashMap<ExcipientName, String>,
}

impl DescriptionLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lookup from `(Excipient, Description)` rows; the last row
    /// for a repeated excipient wins. Incomplete rows and rows with more
    /// cells than the header are skipped.
    pub fn from_table(table: &Table) -> LookupResult<Self> {
        let excipient = require_column(table, TABLE_NAME, COLUMN_EXCIPIENT)?;
        let description = require_column(table, TABLE_NAME, COLUMN_DESCRIPTION)?;

        let mut lookup = Self::new();
        let mut skipped = 0usize;
        for row in 0..table.rows.len() {
            if has_extra_cells(table, row) {
                skipped += 1;
                warn!(
                    "event=row_skipped module=lookup status=warn table={} row={} reason=extra_cells",
                    TABLE_NAME,
                    row + 1
                );
                continue;
            }
            match (
                required_cell(table, row, excipient),
                required_cell(table, row, description),
            ) {
                (Some(name), Some(text)) => lookup.insert(name, text),
                _ => {
                    skipped += 1;
                    warn!(
                        "event=row_skipped module=lookup status=warn table={} row={} reason=missing_field",
                        TABLE_NAME,
                        row + 1
                    );
                }
            }
        }

        info!(
            "event=lookup_load module=lookup status=ok table={} entries={} skipped={}",
            TABLE_NAME,
            lookup.descriptions.len(),
            skipped
        );
        Ok(lookup)
    }

    pub fn load_or_empty(path: Option<&Path>) -> Self {
        load_or_default(path, TABLE_NAME, Self::from_table)
    }

    pub fn insert(&mut self, name: impl Into<ExcipientName>, description: impl Into<String>) {
        self.descriptions.insert(name.into(), description.into());
    }

    /// Returns the description for a name, or [`NO_DESCRIPTION`].
    pub fn describe(&self, name: &str) -> &str {
        self.descriptions
            .get(name.trim())
            .map(String::as_str)
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DescriptionLookup, NO_DESCRIPTION};
    use crate::source::table::Table;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn last_row_wins_and_names_are_trimmed() {
        let table = Table::from_delimited_str(
            "Excipient ,Description\n Talc ,Old\nTalc, Glidant \n,orphan\n",
            ',',
        )
        .unwrap();
        let lookup = DescriptionLookup::from_table(&table).unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.describe("Talc "), "Glidant");
        assert_eq!(lookup.describe("Lactose"), NO_DESCRIPTION);
    }

    #[test]
    fn byte_order_mark_before_header_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("descriptions.csv");
        fs::write(&path, "\u{feff}Excipient,Description\nTalc,Glidant\n").unwrap();

        let lookup = DescriptionLookup::load_or_empty(Some(&path));
        assert_eq!(lookup.describe("Talc"), "Glidant");
    }

    #[test]
    fn rows_with_extra_cells_are_skipped() {
        let table = Table::from_delimited_str(
            "Excipient,Description\nTalc,Glidant\nLactose,Filler, diluent\n",
            ',',
        )
        .unwrap();
        let lookup = DescriptionLookup::from_table(&table).unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.describe("Talc"), "Glidant");
        assert_eq!(lookup.describe("Lactose"), NO_DESCRIPTION);
    }
}
