//! Core domain logic for the todolist tracker.
//! This crate is the single source of truth for business invariants.

pub mod gateway;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

pub use gateway::{
    GatewayError, GatewayResult, MemoryGateway, SqliteGateway, TodoGateway, TODOS_SLOT,
};
pub use logging::{default_log_level, init_logging};
pub use model::todo::{Priority, Todo, TodoDraft, TodoId, TodoPatch, TodoValidationError};
pub use query::{query, CompletionState, SortKey, SortOrder, SortSpec, TodoFilter};
pub use store::todo_store::TodoStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
