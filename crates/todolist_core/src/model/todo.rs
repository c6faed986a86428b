//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical todo record persisted through the gateway.
//! - Provide draft/patch request shapes and input normalization.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - `title` is never empty after normalization.
//! - Optional text fields are either absent or non-empty, never `Some("")`.
//! - `updated_at` is never earlier than `created_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TodoId = Uuid;

/// Task urgency level, totally ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Canonical todo record.
///
/// Serializes camelCase to match the stored payload format. Optional fields
/// are omitted when absent on write; reads accept both `null` and a missing
/// key. `tags` defaults to empty so older payloads without the key still
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable global ID assigned at creation, immutable thereafter.
    pub id: TodoId,
    /// Non-empty, whitespace-trimmed task text.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Calendar date only; no time component is meaningful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Insertion-ordered; duplicates allowed in storage.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Set once at creation, never changed.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, including completion toggles.
    pub updated_at: DateTime<Utc>,
}

/// Validation failure for create/update input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title was empty after trimming surrounding whitespace.
    EmptyTitle,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "todo title must not be empty"),
        }
    }
}

impl Error for TodoValidationError {}

/// Request model for creating a todo.
///
/// Free-form input; normalization happens in [`Todo::from_draft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Raw tag input; each entry may itself be a comma-separated list.
    pub tags: Vec<String>,
}

impl TodoDraft {
    /// Creates a draft with the given title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing todo.
///
/// `None` leaves a field unchanged. Clearable optionals use a nested option:
/// `Some(None)` clears the field, `Some(Some(value))` replaces it. `tags`
/// replaces the whole sequence, never merges. `id` and `created_at` are not
/// representable here and can never be overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl Todo {
    /// Builds a new record from draft input.
    ///
    /// # Contract
    /// - Assigns a fresh v4 id and `created_at = updated_at = now`.
    /// - Normalizes all text input; rejects an empty-after-trim title
    ///   without producing a record.
    pub fn from_draft(draft: TodoDraft) -> Result<Self, TodoValidationError> {
        let title = normalize_title(&draft.title)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: normalize_optional(draft.description.as_deref()),
            completed: false,
            priority: draft.priority,
            due_date: draft.due_date,
            category: normalize_optional(draft.category.as_deref()),
            tags: normalize_tags(&draft.tags),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges patch fields into this record and refreshes `updated_at`.
    ///
    /// # Contract
    /// - Validates before mutating: an invalid patch leaves the record
    ///   completely untouched.
    /// - Fields absent from the patch keep their current value.
    pub fn apply_patch(&mut self, patch: TodoPatch) -> Result<(), TodoValidationError> {
        let title = match patch.title.as_deref() {
            Some(raw) => Some(normalize_title(raw)?),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = normalize_optional(description.as_deref());
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(category) = patch.category {
            self.category = normalize_optional(category.as_deref());
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
        self.touch();
        Ok(())
    }

    /// Flips completion state and refreshes `updated_at`.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    fn touch(&mut self) {
        // max() guards the updated_at >= created_at invariant against a
        // clock that steps backwards between calls.
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Trims a title, rejecting input that is empty afterwards.
pub fn normalize_title(raw: &str) -> Result<String, TodoValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; empty or whitespace-only becomes absent.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits raw tag input on commas, trims each segment, drops empty ones.
///
/// Duplicates are kept; deduplication belongs to the distinct-tag view,
/// not storage.
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_optional, normalize_tags, normalize_title, TodoValidationError};

    #[test]
    fn normalize_title_trims_and_rejects_empty() {
        assert_eq!(normalize_title("  Buy milk ").unwrap(), "Buy milk");
        assert_eq!(
            normalize_title("   ").unwrap_err(),
            TodoValidationError::EmptyTitle
        );
    }

    #[test]
    fn normalize_optional_maps_blank_to_absent() {
        assert_eq!(normalize_optional(Some(" work ")).as_deref(), Some("work"));
        assert_eq!(normalize_optional(Some("   ")), None);
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn normalize_tags_splits_trims_and_drops_empty_segments() {
        let raw = vec!["errand, urgent".to_string(), " ,home,".to_string()];
        assert_eq!(normalize_tags(&raw), vec!["errand", "urgent", "home"]);
    }

    #[test]
    fn normalize_tags_keeps_duplicates() {
        let raw = vec!["a,a".to_string()];
        assert_eq!(normalize_tags(&raw), vec!["a", "a"]);
    }
}
