//! Reference data bundle: relation plus lookups.
//!
//! # Invariants
//! - A bundle only exists when the grid loaded and built successfully.
//! - Bundles are immutable; reloading produces a new bundle.

use crate::config::LoadOptions;
use crate::lookup::{DescriptionLookup, ExplanationLookup};
use crate::model::name::ExcipientName;
use crate::relation::{GridError, IncompatibilityGrid, IncompatibilityRelation};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Fatal startup error: the engine cannot run without a grid.
#[derive(Debug)]
pub enum ReferenceError {
    Grid(GridError),
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
        }
    }
}

impl From<GridError> for ReferenceError {
    fn from(value: GridError) -> Self {
        Self::Grid(value)
    }
}

/// Everything an evaluation or the presentation layer reads.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    relation: IncompatibilityRelation,
    explanations: ExplanationLookup,
    descriptions: DescriptionLookup,
}

impl ReferenceData {
    pub fn new(
        relation: IncompatibilityRelation,
        explanations: ExplanationLookup,
        descriptions: DescriptionLookup,
    ) -> Self {
        Self {
            relation,
            explanations,
            descriptions,
        }
    }

    /// Loads the grid (fatal on failure) and both lookups (degrading).
    pub fn load(options: &LoadOptions) -> ReferenceResult<Self> {
        let relation = IncompatibilityGrid::load(&options.grid_path)
            .and_then(|grid| IncompatibilityRelation::build(&grid, options.asymmetry_policy))
            .map_err(|err| {
                error!(
                    "event=reference_load module=reference status=error error={}",
                    err
                );
                ReferenceError::from(err)
            })?;
        let explanations = ExplanationLookup::load_or_empty(options.explanations_path.as_deref());
        let descriptions = DescriptionLookup::load_or_empty(options.descriptions_path.as_deref());

        info!(
            "event=reference_load module=reference status=ok excipients={} explanations={} descriptions={}",
            relation.excipient_list().len(),
            explanations.len(),
            descriptions.len()
        );
        Ok(Self::new(relation, explanations, descriptions))
    }

    pub fn relation(&self) -> &IncompatibilityRelation {
        &self.relation
    }

    pub fn explanations(&self) -> &ExplanationLookup {
        &self.explanations
    }

    pub fn descriptions(&self) -> &DescriptionLookup {
        &self.descriptions
    }

    /// Sorted excipient universe offered for selection.
    pub fn excipient_list(&self) -> Vec<ExcipientName> {
        self.relation.excipient_list()
    }
}
