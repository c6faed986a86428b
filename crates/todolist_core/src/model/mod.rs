//! Domain model for the todo collection.
//!
//! # Responsibility
//! - Define the canonical record shape shared by store, query and gateway.
//! - Normalize free-form input exactly once, on the write path.
//!
//! # Invariants
//! - Every record is identified by a stable `TodoId`.
//! - Records never carry an empty title or empty-string optionals.

pub mod todo;
