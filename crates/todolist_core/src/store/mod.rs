//! Authoritative ownership of the todo collection.
//!
//! # Responsibility
//! - Apply all mutations through one owner so invariants hold.
//! - Persist write-behind through the gateway after each mutation.
//!
//! # Invariants
//! - No mutable access to the collection escapes the store.

pub mod todo_store;
