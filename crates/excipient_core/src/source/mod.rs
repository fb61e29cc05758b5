//! Tabular reference-data input.
//!
//! # Responsibility
//! - Accept the grid and lookup tables in a plain tabular shape.
//! - Decode JSON and delimited-text exports into that shape.
//!
//! # Invariants
//! - Decoding never interprets cell contents; callers own the semantics.

pub mod table;
