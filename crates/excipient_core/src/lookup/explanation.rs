//! Pair -> rationale lookup.

use crate::lookup::{
    has_extra_cells, load_or_default, require_column, required_cell, LookupResult,
};
use crate::model::pair::IncompatibilityPair;
use crate::source::table::Table;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Fallback returned for pairs without a rationale.
pub const NO_EXPLANATION: &str =
    "No detailed explanation available for this specific incompatibility.";

const TABLE_NAME: &str = "explanation";
const COLUMN_FIRST: &str = "Excipient1";
const COLUMN_SECOND: &str = "Excipient2";
const COLUMN_RATIONALE: &str = "Rationale";

/// Rationale strings keyed by canonical pair.
#[derive(Debug, Clone, Default)]
pub struct ExplanationLookup {
    rationales: HashMap<IncompatibilityPair, String>,
}

impl ExplanationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the lookup from `(Excipient1, Excipient2, Rationale)` rows.
    ///
    /// Rows with a blank required field, more cells than the header, or the
    /// same excipient named twice are skipped with a warning. A later row for the same pair replaces an
    /// earlier one.
    ///
    /// # Errors
    /// - `MissingColumn` when a required header is absent.
    pub fn from_table(table: &Table) -> LookupResult<Self> {
        let first = require_column(table, TABLE_NAME, COLUMN_FIRST)?;
        let second = require_column(table, TABLE_NAME, COLUMN_SECOND)?;
        let rationale = require_column(table, TABLE_NAME, COLUMN_RATIONALE)?;

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
            let parsed = (
                required_cell(table, row, first),
                required_cell(table, row, second),
                required_cell(table, row, rationale),
            );
            let (Some(a), Some(b), Some(text)) = parsed else {
                skipped += 1;
                warn!(
                    "event=row_skipped module=lookup status=warn table={} row={} reason=missing_field",
                    TABLE_NAME,
                    row + 1
                );
                continue;
            };
            let Some(pair) = IncompatibilityPair::new(a, b) else {
                skipped += 1;
                warn!(
                    "event=row_skipped module=lookup status=warn table={} row={} reason=self_pair",
                    TABLE_NAME,
                    row + 1
                );
                continue;
            };
            lookup.insert(pair, text);
        }

        info!(
            "event=lookup_load module=lookup status=ok table={} entries={} skipped={}",
            TABLE_NAME,
            lookup.len(),
            skipped
        );
        Ok(lookup)
    }

    /// Loads from disk; any failure yields an empty lookup.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        load_or_default(path, TABLE_NAME, Self::from_table)
    }

    pub fn insert(&mut self, pair: IncompatibilityPair, rationale: impl Into<String>) {
        self.rationales.insert(pair, rationale.into());
    }

    /// Returns the rationale for a pair, or [`NO_EXPLANATION`].
    pub fn explain(&self, pair: &IncompatibilityPair) -> &str {
        self.rationales
            .get(pair)
            .map(String::as_str)
            .unwrap_or(NO_EXPLANATION)
    }

    /// Same as [`explain`](Self::explain) for two raw names.
    pub fn explain_names(&self, a: &str, b: &str) -> &str {
        match IncompatibilityPair::new(a, b) {
            Some(pair) => self.explain(&pair),
            None => NO_EXPLANATION,
        }
    }

    pub fn len(&self) -> usize {
        self.rationales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rationales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ExplanationLookup, NO_EXPLANATION};
    use crate::lookup::LookupError;
    use crate::source::table::Table;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lookup_is_keyed_by_canonical_pair() {
        let table = Table::from_delimited_str(
            " Excipient1 ,Excipient2,Rationale\nTalc , Lactose,Adsorbs moisture\n",
            ',',
        )
        .unwrap();
        let lookup = ExplanationLookup::from_table(&table).unwrap();
        assert_eq!(lookup.explain_names("Lactose", "Talc"), "Adsorbs moisture");
        assert_eq!(lookup.explain_names(" Talc", "Lactose "), "Adsorbs moisture");
        assert_eq!(lookup.explain_names("Talc", "Mannitol"), NO_EXPLANATION);
    }

    #[test]
    fn bad_rows_are_skipped_individually() {
        let table = Table::from_delimited_str(
            "Excipient1,Excipient2,Rationale\nA,,missing partner\nA,A,self\nA,B\nB,C,kept\n",
            ',',
        )
        .unwrap();
        let lookup = ExplanationLookup::from_table(&table).unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.explain_names("C", "B"), "kept");
    }

    #[test]
    fn unquoted_comma_in_rationale_skips_only_that_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("explanations.csv");
        fs::write(
            &path,
            "Excipient1,Excipient2,Rationale\nLactose,Talc,Moisture uptake\nA,B,Reacts, forms complex\n",
        )
        .unwrap();

        let lookup = ExplanationLookup::load_or_empty(Some(&path));
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.explain_names("Talc", "Lactose"), "Moisture uptake");
        assert_eq!(lookup.explain_names("A", "B"), NO_EXPLANATION);
    }

    #[test]
    fn quoted_rationale_may_span_lines() {
        let table = Table::from_delimited_str(
            "Excipient1,Excipient2,Rationale\nLactose,Talc,\"Maillard browning.\nAvoid with amines.\"\nA,B,kept\n",
            ',',
        )
        .unwrap();
        let lookup = ExplanationLookup::from_table(&table).unwrap();
        assert_eq!(
            lookup.explain_names("Lactose", "Talc"),
            "Maillard browning.\nAvoid with amines."
        );
        assert_eq!(lookup.explain_names("A", "B"), "kept");
    }

    #[test]
    fn missing_column_is_reported() {
        let table = Table::from_delimited_str("Excipient1,Excipient2\nA,B\n", ',').unwrap();
        let err = ExplanationLookup::from_table(&table).unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingColumn {
                column: "Rationale",
                ..
            }
        ));
    }

    #[test]
    fn unconfigured_source_degrades_to_empty() {
        let lookup = ExplanationLookup::load_or_empty(None);
        assert!(lookup.is_empty());
        assert_eq!(lookup.explain_names("A", "B"), NO_EXPLANATION);
    }
}
