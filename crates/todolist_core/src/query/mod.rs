//! Pure filter/sort pipeline over a collection snapshot.
//!
//! # Responsibility
//! - Turn the full collection plus filter and sort specifications into the
//!   ordered view the caller renders.
//!
//! # Invariants
//! - No side effects: input is never mutated or aliased by the output.
//! - All provided filters combine with logical AND.
//! - Sorting is stable; equal keys keep their input order.
//! - A missing due date compares as `NaiveDate::MAX`, so those records
//!   cluster at the end ascending and at the start descending without any
//!   tie-break rule.

use crate::model::todo::{Priority, Todo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Completion-state constraint for filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    #[default]
    All,
    Completed,
    Active,
}

/// Conjunctive match constraints. A `None` field means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFilter {
    /// Exact match against the record's category.
    pub category: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub completion: CompletionState,
    /// Matches when the record's tag sequence contains this exact value.
    pub tag: Option<String>,
}

impl TodoFilter {
    fn matches(&self, todo: &Todo) -> bool {
        if let Some(category) = self.category.as_deref() {
            if todo.category.as_deref() != Some(category) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if todo.priority != priority {
                return false;
            }
        }
        match self.completion {
            CompletionState::All => {}
            CompletionState::Completed => {
                if !todo.completed {
                    return false;
                }
            }
            CompletionState::Active => {
                if todo.completed {
                    return false;
                }
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            if !todo.tags.iter().any(|candidate| candidate == tag) {
                return false;
            }
        }
        true
    }
}

/// Field the view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    DueDate,
    Priority,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// (key, order) pair defining view ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            order: SortOrder::Ascending,
        }
    }
}

/// Produces the filtered, sorted view of a collection snapshot.
pub fn query(todos: &[Todo], filter: &TodoFilter, sort: &SortSpec) -> Vec<Todo> {
    let mut view: Vec<Todo> = todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare_on_key(a, b, sort.key);
        match sort.order {
            SortOrder::Ascending => ordering,
            // Reversing the comparison rather than the output keeps the
            // sort stable for equal keys.
            SortOrder::Descending => ordering.reverse(),
        }
    });

    view
}

fn compare_on_key(a: &Todo, b: &Todo, key: SortKey) -> Ordering {
    match key {
        SortKey::DueDate => due_date_key(a).cmp(&due_date_key(b)),
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

// Absent due dates are pinned to the far future regardless of direction.
fn due_date_key(todo: &Todo) -> NaiveDate {
    todo.due_date.unwrap_or(NaiveDate::MAX)
}
