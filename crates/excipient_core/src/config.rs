//! Reference-data load options.

use crate::relation::AsymmetryPolicy;
use std::path::PathBuf;

/// Where to read reference tables from and how strictly to build the grid.
///
/// Only the grid is required; the lookup tables degrade to empty when absent
/// or unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub grid_path: PathBuf,
    pub explanations_path: Option<PathBuf>,
    pub descriptions_path: Option<PathBuf>,
    pub asymmetry_policy: AsymmetryPolicy,
}

impl LoadOptions {
    pub fn new(grid_path: impl Into<PathBuf>) -> Self {
        Self {
            grid_path: grid_path.into(),
            explanations_path: None,
            descriptions_path: None,
            asymmetry_policy: AsymmetryPolicy::default(),
        }
    }

    pub fn with_explanations(mut self, path: impl Into<PathBuf>) -> Self {
        self.explanations_path = Some(path.into());
        self
    }

    pub fn with_descriptions(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptions_path = Some(path.into());
        self
    }

    pub fn with_asymmetry_policy(mut self, policy: AsymmetryPolicy) -> Self {
        self.asymmetry_policy = policy;
        self
    }
}
