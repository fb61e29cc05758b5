//! Domain model for excipient compatibility checks.
//!
//! # Responsibility
//! - Define canonical names, pairs, findings and formulation records.
//! - Keep one normalization path for every ingestion point.
//!
//! # Invariants
//! - Every excipient name is trimmed before it is compared, hashed or stored.
//! - A pair is unordered and never pairs a name with itself.
//! - Formulation ids are never reused within a process.

pub mod formulation;
pub mod name;
pub mod pair;
