//! Core domain logic for excipient compatibility checks.
//! This crate owns every compatibility and history invariant; UI and
//! report rendering live with callers.

pub mod config;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod reference;
pub mod relation;
pub mod repo;
pub mod service;
pub mod session;
pub mod source;

pub use config::LoadOptions;
pub use logging::{default_log_level, init_logging, logging_status};
pub use lookup::{
    DescriptionLookup, ExplanationLookup, LookupError, LookupResult, NO_DESCRIPTION,
    NO_EXPLANATION,
};
pub use model::formulation::{default_formulation_name, Formulation, FormulationId};
pub use model::name::{normalize_name, normalize_selection, ExcipientName};
pub use model::pair::{Finding, IncompatibilityPair, Severity};
pub use reference::{ReferenceData, ReferenceError, ReferenceResult};
pub use relation::{
    AsymmetryPolicy, CellValue, GridConflict, GridError, GridResult, IncompatibilityGrid,
    IncompatibilityRelation,
};
pub use repo::history_store::{HistoryRepository, InMemoryHistoryStore, RecalledFormulation};
pub use service::evaluator::{
    compatibility_matrix, evaluate, evaluate_with_sets, pair_combinations, Verdict,
};
pub use service::report::{ReportContent, NO_FINDINGS_LINE, REPORT_TITLE};
pub use session::{ActiveFormulation, CheckOutcome, Session, SessionView};
pub use source::table::{Table, TableError, TableFormat, TableResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
