//! Formulation history storage.
//!
//! # Responsibility
//! - Define the history store contract used by sessions and FFI callers.
//! - Provide the in-process implementation.
//!
//! # Invariants
//! - Records are addressed by id only; positions are never stable handles.
//! - Unknown ids are absorbed as no-op outcomes, never errors or panics.

pub mod history_store;
