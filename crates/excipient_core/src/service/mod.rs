//! Compatibility use-cases.
//!
//! # Responsibility
//! - Evaluate a selection against the relation.
//! - Derive verdicts, matrices and report content from findings.
//!
//! # Invariants
//! - Every function here is pure: same inputs, same outputs, no side effects.

pub mod evaluator;
pub mod report;
