//! Session state machine.

use crate::model::formulation::{Formulation, FormulationId};
use crate::model::name::{normalize_selection, ExcipientName};
use crate::model::pair::Finding;
use crate::reference::ReferenceData;
use crate::repo::history_store::{HistoryRepository, InMemoryHistoryStore, RecalledFormulation};
use crate::service::evaluator::{compatibility_matrix, evaluate, Verdict};
use crate::service::report::ReportContent;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionView {
    Input,
    Results,
}

/// Formulation currently shown on the results view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFormulation {
    pub id: FormulationId,
    pub name: String,
    pub excipients: Vec<ExcipientName>,
    pub findings: Vec<Finding>,
    pub verdict: Verdict,
}

impl From<RecalledFormulation> for ActiveFormulation {
    fn from(value: RecalledFormulation) -> Self {
        let verdict = Verdict::from_findings(&value.excipients, &value.findings);
        Self {
            id: value.id,
            name: value.name,
            excipients: value.excipients,
            findings: value.findings,
            verdict,
        }
    }
}

/// Result of a `check` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Created record, absent when the selection was empty.
    pub id: Option<FormulationId>,
    pub findings: Vec<Finding>,
    pub verdict: Verdict,
}

/// One user's check session.
pub struct Session<R: HistoryRepository = InMemoryHistoryStore> {
    reference: Arc<ReferenceData>,
    history: R,
    view: SessionView,
    active: Option<ActiveFormulation>,
    renaming: Option<FormulationId>,
}

impl Session<InMemoryHistoryStore> {
    /// Creates a session with an empty in-memory history.
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self::with_repository(reference, InMemoryHistoryStore::new())
    }
}

impl<R: HistoryRepository> Session<R> {
    pub fn with_repository(reference: Arc<ReferenceData>, history: R) -> Self {
        Self {
            reference,
            history,
            view: SessionView::Input,
            active: None,
            renaming: None,
        }
    }

    pub fn reference(&self) -> &Arc<ReferenceData> {
        &self.reference
    }

    /// Swaps in new reference data. Later checks and recalls use it; the
    /// active results stay as evaluated until the next transition.
    pub fn replace_reference(&mut self, reference: Arc<ReferenceData>) {
        self.reference = reference;
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn active(&self) -> Option<&ActiveFormulation> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &R {
        &self.history
    }

    /// Most-recent-first history snapshot.
    pub fn list_history(&self) -> Vec<Formulation> {
        self.history.list()
    }

    /// `Input --check--> Results`.
    ///
    /// Also accepted from `Results`, where it acts as `new_formulation`
    /// followed by `check`: a fresh record is created and replaces the active
    /// one. An empty selection creates no record and changes neither the view
    /// nor the active formulation; the verdict is `NoExcipients`.
    pub fn check<I, S>(&mut self, selection: I) -> CheckOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excipients: Vec<ExcipientName> = normalize_selection(selection)
            .into_iter()
            .filter(|name| !name.is_empty())
            .collect();
        if excipients.is_empty() {
            debug!("event=session_check module=session status=skip reason=empty_selection");
            return CheckOutcome {
                id: None,
                findings: Vec::new(),
                verdict: Verdict::NoExcipients,
            };
        }

        let findings = evaluate(&excipients, self.reference.relation());
        let verdict = Verdict::from_findings(&excipients, &findings);
        let id = self.history.create(excipients.clone());
        let name = self
            .history
            .get(id)
            .map(|record| record.name().to_string())
            .unwrap_or_default();

        self.active = Some(ActiveFormulation {
            id,
            name,
            excipients,
            findings: findings.clone(),
            verdict,
        });
        self.view = SessionView::Results;
        debug!(
            "event=session_check module=session status=ok id={} findings={}",
            id,
            findings.len()
        );
        CheckOutcome {
            id: Some(id),
            findings,
            verdict,
        }
    }

    /// `Results --new--> Input`. A no-op on the input view.
    pub fn new_formulation(&mut self) {
        self.view = SessionView::Input;
        self.active = None;
    }

    /// `Results --recall(id)--> Results`.
    ///
    /// Unknown ids leave the session untouched and return `None`.
    pub fn recall(&mut self, id: FormulationId) -> Option<&ActiveFormulation> {
        let recalled = self.history.recall(id, self.reference.relation())?;
        self.active = Some(ActiveFormulation::from(recalled));
        self.view = SessionView::Results;
        self.active.as_ref()
    }

    pub fn rename(&mut self, id: FormulationId, new_name: &str) -> bool {
        let changed = self.history.rename(id, new_name);
        if changed {
            if let (Some(active), Some(record)) = (self.active.as_mut(), self.history.get(id)) {
                if active.id == id {
                    active.name = record.name().to_string();
                }
            }
        }
        changed
    }

    /// Deletes a record. The results view keeps showing it if it was active.
    pub fn delete(&mut self, id: FormulationId) -> bool {
        let removed = self.history.delete(id);
        if self.renaming == Some(id) {
            self.renaming = None;
        }
        removed
    }

    /// Enters rename-editing mode for one record.
    pub fn begin_rename(&mut self, id: FormulationId) -> bool {
        if self.history.get(id).is_none() {
            warn!(
                "event=formulation_missing module=session status=warn op=begin_rename id={}",
                id
            );
            return false;
        }
        self.renaming = Some(id);
        true
    }

    /// Applies the edited name and leaves editing mode either way.
    pub fn commit_rename(&mut self, new_name: &str) -> bool {
        match self.renaming.take() {
            Some(id) => self.rename(id, new_name),
            None => false,
        }
    }

    pub fn cancel_rename(&mut self) {
        self.renaming = None;
    }

    pub fn renaming(&self) -> Option<FormulationId> {
        self.renaming
    }

    /// Rationale for one finding of the active formulation.
    pub fn explain(&self, finding: &Finding) -> &str {
        self.reference.explanations().explain(&finding.pair)
    }

    pub fn describe(&self, name: &str) -> &str {
        self.reference.descriptions().describe(name)
    }

    pub fn active_report(&self) -> Option<ReportContent> {
        self.active
            .as_ref()
            .map(|active| ReportContent::new(&active.excipients, &active.findings))
    }

    pub fn active_matrix(&self) -> Option<Vec<Vec<u8>>> {
        self.active
            .as_ref()
            .map(|active| compatibility_matrix(&active.excipients, self.reference.relation()))
    }
}
