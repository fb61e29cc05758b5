//! Formulation history record.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused in the process.
//! - `excipients` keeps the user's selection order (duplicates included) and
//!   is immutable after creation.
//! - `name` only changes through an explicit rename.

use crate::model::name::ExcipientName;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Process-unique, monotonically increasing formulation identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FormulationId(u64);

impl FormulationId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for FormulationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name assigned to a new record.
pub fn default_formulation_name(id: FormulationId) -> String {
    format!("Formulation {id}")
}

/// One previously checked formulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Formulation {
    id: FormulationId,
    name: String,
    excipients: Vec<ExcipientName>,
}

impl Formulation {
    /// Creates a record with the default `Formulation {id}` name.
    pub fn new(id: FormulationId, excipients: Vec<ExcipientName>) -> Self {
        Self {
            id,
            name: default_formulation_name(id),
            excipients,
        }
    }

    pub fn id(&self) -> FormulationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn excipients(&self) -> &[ExcipientName] {
        &self.excipients
    }

    /// Excipients sorted alphabetically for summary display.
    pub fn sorted_excipients(&self) -> Vec<ExcipientName> {
        let mut sorted = self.excipients.clone();
        sorted.sort();
        sorted
    }

    /// Applies a rename request.
    ///
    /// Returns `true` only when the stored name changed. Empty (after trim)
    /// and unchanged names are ignored.
    pub(crate) fn rename(&mut self, new_name: &str) -> bool {
        let trimmed = new_name.trim();
        if trimmed.is_empty() || trimmed == self.name {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }
}
