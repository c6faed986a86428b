//! Todo store: in-memory collection with write-behind persistence.
//!
//! # Responsibility
//! - Own the authoritative collection for the process lifetime.
//! - Keep derived fields (`updated_at`, normalization) consistent on every
//!   mutation.
//! - Persist the full collection through the gateway after each applied
//!   mutation and notify subscribed listeners.
//!
//! # Invariants
//! - `id` values stay unique across the collection.
//! - Stored order is insertion order; only the query pipeline reorders, and
//!   only on copies.
//! - A failed save never rolls back the in-memory mutation; the failure is
//!   recorded for a non-blocking warning surface.

use crate::gateway::{GatewayError, TodoGateway};
use crate::model::todo::{Todo, TodoDraft, TodoId, TodoPatch, TodoValidationError};
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Callback invoked with the collection after each applied mutation.
pub type ChangeListener = Box<dyn Fn(&[Todo])>;

/// Single authoritative owner of the todo collection.
///
/// Construct one per application and pass it to whatever needs it; the
/// store is not a process-wide singleton.
pub struct TodoStore<G: TodoGateway> {
    gateway: G,
    todos: Vec<Todo>,
    listeners: Vec<ChangeListener>,
    last_save_error: Option<GatewayError>,
}

impl<G: TodoGateway> TodoStore<G> {
    /// Hydrates a store from durable state.
    ///
    /// A load failure degrades to an empty collection and is logged; it
    /// never fails construction.
    pub fn open(gateway: G) -> Self {
        let todos = match gateway.load() {
            Ok(todos) => {
                info!(
                    "event=store_hydrate module=store status=ok count={}",
                    todos.len()
                );
                todos
            }
            Err(err) => {
                error!(
                    "event=store_hydrate module=store status=error \
                     error_code=load_failed error={err}"
                );
                Vec::new()
            }
        };

        Self {
            gateway,
            todos,
            listeners: Vec::new(),
            last_save_error: None,
        }
    }

    /// Creates a record from draft input and appends it to the collection.
    ///
    /// # Contract
    /// - An empty-after-trim title is rejected and nothing changes.
    /// - Returns the freshly assigned id on success.
    pub fn add(&mut self, draft: TodoDraft) -> Result<TodoId, TodoValidationError> {
        let todo = Todo::from_draft(draft)?;
        let id = todo.id;
        self.todos.push(todo);
        self.commit("store_add");
        Ok(id)
    }

    /// Merges patch fields into the matching record.
    ///
    /// # Contract
    /// - An unknown id is a silent no-op returning `Ok(false)`.
    /// - `tags` in the patch replaces the whole sequence.
    /// - `id` and `created_at` are never touched.
    /// - Refreshes `updated_at` and persists when applied.
    pub fn update(&mut self, id: TodoId, patch: TodoPatch) -> Result<bool, TodoValidationError> {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            debug!("event=store_update module=store status=skip id={id} reason=not_found");
            return Ok(false);
        };

        todo.apply_patch(patch)?;
        self.commit("store_update");
        Ok(true)
    }

    /// Removes the matching record, if present.
    ///
    /// Persists the resulting collection either way, so repeated deletes of
    /// the same id stay idempotent.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        let removed = self.todos.len() != before;
        if !removed {
            debug!("event=store_delete module=store status=skip id={id} reason=not_found");
        }
        self.commit("store_delete");
        removed
    }

    /// Flips completion on the matching record and refreshes `updated_at`.
    ///
    /// An unknown id is a silent no-op returning `false`.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) else {
            debug!("event=store_toggle module=store status=skip id={id} reason=not_found");
            return false;
        };

        todo.toggle_completed();
        self.commit("store_toggle");
        true
    }

    /// Read-only view of the collection in insertion order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Present category values, deduplicated, in first-seen order.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.todos
            .iter()
            .filter_map(|todo| todo.category.as_deref())
            .filter(|category| seen.insert(*category))
            .map(str::to_string)
            .collect()
    }

    /// All tag values across the collection, deduplicated, first-seen order.
    pub fn distinct_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.todos
            .iter()
            .flat_map(|todo| todo.tags.iter())
            .filter(|tag| seen.insert(tag.as_str()))
            .map(String::clone)
            .collect()
    }

    /// Registers a listener invoked with the collection after each applied
    /// mutation. Presentation layers decide how to re-render.
    pub fn subscribe(&mut self, listener: impl Fn(&[Todo]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Last save failure, if the most recent persist attempt failed.
    ///
    /// Cleared by the next successful save. Intended for a non-blocking
    /// "changes may not be saved" warning.
    pub fn last_save_error(&self) -> Option<&GatewayError> {
        self.last_save_error.as_ref()
    }

    /// Shared access to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn commit(&mut self, event: &str) {
        match self.gateway.save(&self.todos) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok count={}",
                    self.todos.len()
                );
                self.last_save_error = None;
            }
            Err(err) => {
                warn!(
                    "event={event} module=store status=warn error_code=save_failed \
                     count={} error={err}",
                    self.todos.len()
                );
                self.last_save_error = Some(err);
            }
        }

        for listener in &self.listeners {
            listener(&self.todos);
        }
    }
}
