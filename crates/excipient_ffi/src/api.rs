//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose check/recall/rename/delete/history over one process-wide session.
//! - Flatten core types into plain envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - All session mutations are serialized by one mutex.
//! - Calls before `load_reference` succeeds return a failure envelope.

use excipient_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, AsymmetryPolicy,
    Finding, FormulationId, LoadOptions, ReferenceData, Session, SessionView, Verdict,
};
use log::warn;
use std::sync::{Arc, Mutex, MutexGuard};

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

const NOT_LOADED: &str = "reference data not loaded; call load_reference first";

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Outcome of loading reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResponse {
    pub ok: bool,
    /// Number of distinct excipients offered for selection.
    pub excipient_count: u32,
    /// Asymmetric grid pairs detected (always 0 when `strict`).
    pub conflict_count: u32,
    pub message: String,
}

/// One incompatibility ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingItem {
    pub first: String,
    pub second: String,
    /// `Major` or `Minor`.
    pub severity: String,
    pub explanation: String,
}

/// Result envelope for check and recall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResponse {
    pub ok: bool,
    pub formulation_id: Option<u64>,
    pub name: Option<String>,
    pub excipients: Vec<String>,
    pub findings: Vec<FindingItem>,
    /// `no_excipients`, `compatible` or `incompatible`; empty on failure.
    pub verdict: String,
    pub message: String,
}

impl CheckResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            formulation_id: None,
            name: None,
            excipients: Vec::new(),
            findings: Vec::new(),
            verdict: String::new(),
            message: message.into(),
        }
    }
}

/// One history sidebar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub id: u64,
    pub name: String,
    pub excipients: Vec<String>,
}

/// Loads reference tables and installs them in the session.
///
/// The first successful call creates the session; later calls replace the
/// reference data and keep history.
#[flutter_rust_bridge::frb(sync)]
pub fn load_reference(
    grid_path: String,
    explanations_path: Option<String>,
    descriptions_path: Option<String>,
    strict: bool,
) -> LoadResponse {
    let mut options = LoadOptions::new(grid_path.trim());
    if let Some(path) = non_blank(explanations_path) {
        options = options.with_explanations(path);
    }
    if let Some(path) = non_blank(descriptions_path) {
        options = options.with_descriptions(path);
    }
    if strict {
        options = options.with_asymmetry_policy(AsymmetryPolicy::Reject);
    }

    let reference = match ReferenceData::load(&options) {
        Ok(reference) => Arc::new(reference),
        Err(err) => {
            return LoadResponse {
                ok: false,
                excipient_count: 0,
                conflict_count: 0,
                message: format!("load_reference failed: {err}"),
            };
        }
    };

    let excipient_count = to_u32(reference.excipient_list().len());
    let conflict_count = to_u32(reference.relation().conflicts().len());
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(session) => session.replace_reference(reference),
        None => *guard = Some(Session::new(reference)),
    }

    LoadResponse {
        ok: true,
        excipient_count,
        conflict_count,
        message: format!("Loaded {excipient_count} excipient(s)."),
    }
}

/// Sorted excipient names offered for selection; empty before loading.
#[flutter_rust_bridge::frb(sync)]
pub fn excipient_list() -> Vec<String> {
    with_session(|session| {
        session
            .reference()
            .excipient_list()
            .into_iter()
            .map(|name| name.into_string())
            .collect()
    })
    .unwrap_or_default()
}

/// Description tooltip text for one excipient.
#[flutter_rust_bridge::frb(sync)]
pub fn describe_excipient(name: String) -> String {
    with_session(|session| session.describe(&name).to_string()).unwrap_or_default()
}

/// Checks a selection and records it in history when non-empty.
#[flutter_rust_bridge::frb(sync)]
pub fn check_formulation(excipients: Vec<String>) -> CheckResponse {
    with_session(|session| {
        let outcome = session.check(&excipients);
        match outcome.id {
            Some(_) => active_response(session),
            None => CheckResponse {
                ok: true,
                verdict: verdict_label(outcome.verdict),
                message: outcome.verdict.message().to_string(),
                ..CheckResponse::failure(String::new())
            },
        }
    })
    .unwrap_or_else(|| CheckResponse::failure(NOT_LOADED))
}

/// Re-evaluates a stored formulation and makes it active.
#[flutter_rust_bridge::frb(sync)]
pub fn recall_formulation(id: u64) -> CheckResponse {
    with_session(|session| {
        if session.recall(FormulationId::new(id)).is_some() {
            active_response(session)
        } else {
            CheckResponse::failure(format!("formulation {id} not found"))
        }
    })
    .unwrap_or_else(|| CheckResponse::failure(NOT_LOADED))
}

/// Returns to the input view.
#[flutter_rust_bridge::frb(sync)]
pub fn new_formulation() {
    with_session(|session| session.new_formulation());
}

/// `true` when the session is on the results view.
#[flutter_rust_bridge::frb(sync)]
pub fn showing_results() -> bool {
    with_session(|session| session.view() == SessionView::Results).unwrap_or(false)
}

/// Renames a record; `false` for blank, unchanged or unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn rename_formulation(id: u64, name: String) -> bool {
    with_session(|session| session.rename(FormulationId::new(id), &name)).unwrap_or(false)
}

/// Enters rename mode for one record; `false` for an unknown id.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_rename(id: u64) -> bool {
    with_session(|session| session.begin_rename(FormulationId::new(id))).unwrap_or(false)
}

/// Applies `name` to the record under rename and leaves rename mode.
///
/// Returns `false` when no rename is in progress or the name is blank or
/// unchanged; rename mode ends either way.
#[flutter_rust_bridge::frb(sync)]
pub fn commit_rename(name: String) -> bool {
    with_session(|session| session.commit_rename(&name)).unwrap_or(false)
}

#[flutter_rust_bridge::frb(sync)]
pub fn cancel_rename() {
    with_session(|session| session.cancel_rename());
}

/// Id of the record currently under rename, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn renaming_formulation() -> Option<u64> {
    with_session(|session| session.renaming().map(|id| id.get())).flatten()
}

/// Deletes a record; `false` when it did not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_formulation(id: u64) -> bool {
    with_session(|session| session.delete(FormulationId::new(id))).unwrap_or(false)
}

/// Most-recent-first history rows.
#[flutter_rust_bridge::frb(sync)]
pub fn list_history() -> Vec<HistoryItem> {
    with_session(|session| {
        session
            .list_history()
            .into_iter()
            .map(|record| HistoryItem {
                id: record.id().get(),
                name: record.name().to_string(),
                excipients: record
                    .excipients()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Plain-text report for the active formulation.
#[flutter_rust_bridge::frb(sync)]
pub fn active_report_text(generated_at: Option<String>) -> Option<String> {
    with_session(|session| {
        session
            .active_report()
            .map(|report| report.render_text(generated_at.as_deref()))
    })
    .flatten()
}

/// Code matrix (0/1/2) for the active formulation, in selection order.
#[flutter_rust_bridge::frb(sync)]
pub fn active_matrix() -> Vec<Vec<u8>> {
    with_session(|session| session.active_matrix())
        .flatten()
        .unwrap_or_default()
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // Why: a panic in another caller must not lock the UI out of its history.
    SESSION.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=warn reason=poisoned");
        poisoned.into_inner()
    })
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Option<T> {
    let mut guard = lock_session();
    guard.as_mut().map(f)
}

fn active_response(session: &Session) -> CheckResponse {
    let Some(active) = session.active() else {
        return CheckResponse::failure("no active formulation");
    };
    CheckResponse {
        ok: true,
        formulation_id: Some(active.id.get()),
        name: Some(active.name.clone()),
        excipients: active.excipients.iter().map(|n| n.to_string()).collect(),
        findings: active
            .findings
            .iter()
            .map(|finding| to_finding_item(session, finding))
            .collect(),
        verdict: verdict_label(active.verdict),
        message: active.verdict.message().to_string(),
    }
}

fn to_finding_item(session: &Session, finding: &Finding) -> FindingItem {
    FindingItem {
        first: finding.pair.first().to_string(),
        second: finding.pair.second().to_string(),
        severity: finding.severity.label().to_string(),
        explanation: session.explain(finding).to_string(),
    }
}

fn verdict_label(verdict: Verdict) -> String {
    match verdict {
        Verdict::NoExcipients => "no_excipients",
        Verdict::Compatible => "compatible",
        Verdict::Incompatible => "incompatible",
    }
    .to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        active_matrix, active_report_text, begin_rename, cancel_rename, check_formulation,
        commit_rename, core_version, delete_formulation, describe_excipient, excipient_list,
        init_logging, list_history, load_reference, new_formulation, recall_formulation,
        rename_formulation, renaming_formulation, showing_results,
    };
    use std::path::Path;
    use std::sync::Mutex;

    // Tests share the process-wide session; run them one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    const GRID: &str = ",Lactose,Magnesium Stearate,Talc\n\
Lactose,0,2,1\n\
Magnesium Stearate,2,0,0\n\
Talc,1,0,0\n";

    fn load(dir: &Path) {
        let grid = dir.join("grid.csv");
        let explanations = dir.join("explanations.csv");
        let descriptions = dir.join("descriptions.csv");
        std::fs::write(&grid, GRID).unwrap();
        std::fs::write(
            &explanations,
            "Excipient1,Excipient2,Rationale\nLactose,Magnesium Stearate,Degradation risk\n",
        )
        .unwrap();
        std::fs::write(&descriptions, "Excipient,Description\nTalc,Glidant\n").unwrap();

        let response = load_reference(
            grid.display().to_string(),
            Some(explanations.display().to_string()),
            Some(descriptions.display().to_string()),
            true,
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.excipient_count, 3);
        assert_eq!(response.conflict_count, 0);
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp".to_string()).is_empty());
    }

    #[test]
    fn load_reference_reports_missing_grid() {
        let _serial = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let response = load_reference("/nonexistent/grid.csv".to_string(), None, None, false);
        assert!(!response.ok);
        assert!(response.message.contains("load_reference failed"));
    }

    #[test]
    fn check_recall_rename_delete_roundtrip() {
        let _serial = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        load(dir.path());

        assert_eq!(
            excipient_list(),
            vec!["Lactose", "Magnesium Stearate", "Talc"]
        );
        assert_eq!(describe_excipient(" Talc ".to_string()), "Glidant");

        let checked = check_formulation(vec![
            "Lactose".to_string(),
            "Magnesium Stearate".to_string(),
            "Talc".to_string(),
        ]);
        assert!(checked.ok);
        assert_eq!(checked.verdict, "incompatible");
        assert_eq!(checked.findings.len(), 2);
        assert_eq!(checked.findings[0].severity, "Major");
        assert_eq!(checked.findings[0].explanation, "Degradation risk");
        assert!(showing_results());
        let id = checked.formulation_id.unwrap();

        assert_eq!(active_matrix(), vec![vec![0, 2, 1], vec![2, 0, 0], vec![1, 0, 0]]);
        let report = active_report_text(None).unwrap();
        assert!(report.contains("❌ Lactose & Magnesium Stearate – Major"));

        new_formulation();
        assert!(!showing_results());

        assert!(rename_formulation(id, "Blend A".to_string()));
        assert!(!rename_formulation(id, " ".to_string()));
        assert!(list_history()
            .iter()
            .any(|item| item.id == id && item.name == "Blend A"));

        let recalled = recall_formulation(id);
        assert!(recalled.ok);
        assert_eq!(recalled.name.as_deref(), Some("Blend A"));
        assert_eq!(recalled.findings, checked.findings);

        assert!(delete_formulation(id));
        assert!(!delete_formulation(id));
        assert!(!recall_formulation(id).ok);
    }

    #[test]
    fn empty_check_is_not_recorded() {
        let _serial = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        load(dir.path());

        let before = list_history().len();
        let response = check_formulation(Vec::new());
        assert!(response.ok);
        assert_eq!(response.verdict, "no_excipients");
        assert_eq!(response.formulation_id, None);
        assert_eq!(list_history().len(), before);
    }

    #[test]
    fn rename_mode_commits_once_and_can_be_cancelled() {
        let _serial = SERIAL.lock().unwrap_or_else(|p| p.into_inner());
        let dir = tempfile::tempdir().unwrap();
        load(dir.path());

        let id = check_formulation(vec!["Lactose".to_string(), "Talc".to_string()])
            .formulation_id
            .unwrap();
        assert_eq!(renaming_formulation(), None);
        assert!(!commit_rename("Orphan".to_string()));

        assert!(!begin_rename(id + 1000));
        assert_eq!(renaming_formulation(), None);

        assert!(begin_rename(id));
        assert_eq!(renaming_formulation(), Some(id));
        cancel_rename();
        assert_eq!(renaming_formulation(), None);
        assert!(!commit_rename("Ignored".to_string()));

        assert!(begin_rename(id));
        assert!(commit_rename("Blend B".to_string()));
        assert_eq!(renaming_formulation(), None);
        assert!(!commit_rename("Blend C".to_string()));
        assert!(list_history()
            .iter()
            .any(|item| item.id == id && item.name == "Blend B"));
    }
}
