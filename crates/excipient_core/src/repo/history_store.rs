//! History store contract and in-memory implementation.
//!
//! # Invariants
//! - Ids come from a monotonically increasing counter and are never reused,
//!   even after deletion.
//! - Listing order is most-recent-first.
//! - Deletion filters by id, so deleting while walking an id snapshot never
//!   skips or repeats a record.

use crate::model::formulation::{Formulation, FormulationId};
use crate::model::name::ExcipientName;
use crate::model::pair::Finding;
use crate::relation::IncompatibilityRelation;
use crate::service::evaluator::evaluate;
use log::{info, warn};
use serde::Serialize;

/// Result of recalling one stored formulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecalledFormulation {
    pub id: FormulationId,
    pub name: String,
    pub excipients: Vec<ExcipientName>,
    /// Freshly evaluated against the relation passed to `recall`.
    pub findings: Vec<Finding>,
}

/// History store contract.
pub trait HistoryRepository {
    /// Inserts a new record at the front and returns its id. Always succeeds.
    fn create(&mut self, excipients: Vec<ExcipientName>) -> FormulationId;
    /// Renames a record. Returns `true` only when the name changed.
    fn rename(&mut self, id: FormulationId, new_name: &str) -> bool;
    /// Removes a record. Returns `true` when a record was removed.
    fn delete(&mut self, id: FormulationId) -> bool;
    fn get(&self, id: FormulationId) -> Option<&Formulation>;
    /// Most-recent-first snapshot of all records.
    fn list(&self) -> Vec<Formulation>;
    /// Most-recent-first snapshot of all ids.
    fn ids(&self) -> Vec<FormulationId>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a record and re-evaluates it against `relation`.
    ///
    /// Returns `None` for unknown ids; this is a caller consistency bug and is
    /// logged rather than raised.
    fn recall(
        &self,
        id: FormulationId,
        relation: &IncompatibilityRelation,
    ) -> Option<RecalledFormulation> {
        let Some(record) = self.get(id) else {
            warn!(
                "event=formulation_missing module=repo status=warn op=recall id={}",
                id
            );
            return None;
        };
        Some(RecalledFormulation {
            id: record.id(),
            name: record.name().to_string(),
            excipients: record.excipients().to_vec(),
            findings: evaluate(record.excipients(), relation),
        })
    }
}

/// Process-lifetime, in-memory history store.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: Vec<Formulation>,
    last_id: u64,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: FormulationId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl HistoryRepository for InMemoryHistoryStore {
    fn create(&mut self, excipients: Vec<ExcipientName>) -> FormulationId {
        self.last_id += 1;
        let id = FormulationId::new(self.last_id);
        let count = excipients.len();
        self.records.insert(0, Formulation::new(id, excipients));
        info!(
            "event=formulation_create module=repo status=ok id={} excipients={}",
            id, count
        );
        id
    }

    fn rename(&mut self, id: FormulationId, new_name: &str) -> bool {
        let Some(index) = self.position(id) else {
            warn!(
                "event=formulation_missing module=repo status=warn op=rename id={}",
                id
            );
            return false;
        };
        let changed = self.records[index].rename(new_name);
        info!(
            "event=formulation_rename module=repo status={} id={}",
            if changed { "ok" } else { "skip" },
            id
        );
        changed
    }

    fn delete(&mut self, id: FormulationId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = self.records.len() != before;
        info!(
            "event=formulation_delete module=repo status={} id={}",
            if removed { "ok" } else { "skip" },
            id
        );
        removed
    }

    fn get(&self, id: FormulationId) -> Option<&Formulation> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn list(&self) -> Vec<Formulation> {
        self.records.clone()
    }

    fn ids(&self) -> Vec<FormulationId> {
        self.records.iter().map(Formulation::id).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryRepository, InMemoryHistoryStore};
    use crate::model::formulation::FormulationId;
    use crate::model::name::normalize_selection;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = InMemoryHistoryStore::new();
        let first = store.create(normalize_selection(["A"]));
        assert!(store.delete(first));
        let second = store.create(normalize_selection(["B"]));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn deleting_every_id_from_a_snapshot_empties_the_store() {
        let mut store = InMemoryHistoryStore::new();
        for _ in 0..5 {
            store.create(Vec::new());
        }
        for id in store.ids() {
            assert!(store.delete(id));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = InMemoryHistoryStore::new();
        store.create(Vec::new());
        let missing = FormulationId::new(99);
        assert!(!store.rename(missing, "X"));
        assert!(!store.delete(missing));
        assert!(store.get(missing).is_none());
        assert_eq!(store.len(), 1);
    }
}
