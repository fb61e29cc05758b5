//! Interactive check session.
//!
//! # Responsibility
//! - Own the history store, the current reference data and the view state.
//! - Express UI actions (check, new, recall, rename, delete) as explicit
//!   transitions independent of any rendering technology.
//!
//! # Invariants
//! - The view starts in `Input`; `check` with a non-empty selection (from
//!   either view) and `recall` of a known id move it to `Results`;
//!   `new_formulation` moves it back to `Input`. Nothing else changes it.
//! - Recall always evaluates against the reference data current at call time.
//! - At most one record is in rename-editing mode; deleting it ends the edit.

pub mod state;

pub use state::{ActiveFormulation, CheckOutcome, Session, SessionView};
