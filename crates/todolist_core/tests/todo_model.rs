use chrono::NaiveDate;
use serde_json::json;
use todolist_core::{Priority, Todo, TodoDraft, TodoPatch, TodoValidationError};

fn draft(title: &str) -> TodoDraft {
    TodoDraft::new(title)
}

#[test]
fn from_draft_normalizes_all_text_input() {
    let todo = Todo::from_draft(TodoDraft {
        title: "  Buy milk ".to_string(),
        description: Some("   ".to_string()),
        category: Some(" errands ".to_string()),
        tags: vec!["errand, urgent".to_string()],
        ..TodoDraft::default()
    })
    .unwrap();

    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, None);
    assert_eq!(todo.category.as_deref(), Some("errands"));
    assert_eq!(todo.tags, vec!["errand", "urgent"]);
    assert!(!todo.completed);
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.created_at, todo.updated_at);
}

#[test]
fn from_draft_rejects_blank_title() {
    let err = Todo::from_draft(draft("   ")).unwrap_err();
    assert_eq!(err, TodoValidationError::EmptyTitle);
}

#[test]
fn apply_patch_merges_only_supplied_fields() {
    let mut todo = Todo::from_draft(draft("Write report")).unwrap();
    let id = todo.id;
    let created_at = todo.created_at;

    todo.apply_patch(TodoPatch {
        title: Some("  Write final report ".to_string()),
        priority: Some(Priority::High),
        ..TodoPatch::default()
    })
    .unwrap();

    assert_eq!(todo.id, id);
    assert_eq!(todo.created_at, created_at);
    assert_eq!(todo.title, "Write final report");
    assert_eq!(todo.priority, Priority::High);
    assert_eq!(todo.description, None);
    assert!(todo.updated_at >= todo.created_at);
}

#[test]
fn apply_patch_clears_optionals_with_nested_none() {
    let mut todo = Todo::from_draft(TodoDraft {
        title: "Plan trip".to_string(),
        description: Some("pack bags".to_string()),
        due_date: NaiveDate::from_ymd_opt(2025, 6, 1),
        ..TodoDraft::default()
    })
    .unwrap();

    todo.apply_patch(TodoPatch {
        description: Some(None),
        due_date: Some(None),
        ..TodoPatch::default()
    })
    .unwrap();

    assert_eq!(todo.description, None);
    assert_eq!(todo.due_date, None);
}

#[test]
fn apply_patch_replaces_tags_wholesale() {
    let mut todo = Todo::from_draft(TodoDraft {
        title: "Refactor".to_string(),
        tags: vec!["old".to_string()],
        ..TodoDraft::default()
    })
    .unwrap();

    todo.apply_patch(TodoPatch {
        tags: Some(vec!["new, shiny".to_string()]),
        ..TodoPatch::default()
    })
    .unwrap();

    assert_eq!(todo.tags, vec!["new", "shiny"]);
}

#[test]
fn invalid_patch_leaves_record_untouched() {
    let mut todo = Todo::from_draft(draft("Keep me")).unwrap();
    let snapshot = todo.clone();

    let err = todo
        .apply_patch(TodoPatch {
            title: Some("   ".to_string()),
            completed: Some(true),
            ..TodoPatch::default()
        })
        .unwrap_err();

    assert_eq!(err, TodoValidationError::EmptyTitle);
    assert_eq!(todo, snapshot);
}

#[test]
fn toggle_twice_restores_completed_state() {
    let mut todo = Todo::from_draft(draft("Flip me")).unwrap();

    todo.toggle_completed();
    assert!(todo.completed);
    let after_first = todo.updated_at;

    todo.toggle_completed();
    assert!(!todo.completed);
    assert!(todo.updated_at >= after_first);
}

#[test]
fn priority_is_totally_ordered() {
    assert!(Priority::Low < Priority::Medium);
    assert!(Priority::Medium < Priority::High);
}

#[test]
fn serialization_uses_camel_case_and_omits_absent_optionals() {
    let todo = Todo::from_draft(draft("Wire format")).unwrap();
    let value = serde_json::to_value(&todo).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.contains_key("createdAt"));
    assert!(object.contains_key("updatedAt"));
    assert!(!object.contains_key("description"));
    assert!(!object.contains_key("dueDate"));
    assert!(!object.contains_key("category"));
    assert_eq!(object["priority"], json!("medium"));
}

#[test]
fn deserialization_accepts_null_and_missing_optionals() {
    let explicit_null = json!({
        "id": "7f2c1e80-33aa-4c2a-9e4e-0f5d1bb0a111",
        "title": "From wire",
        "description": null,
        "completed": false,
        "priority": "high",
        "dueDate": "2025-01-10",
        "category": null,
        "tags": ["home"],
        "createdAt": "2025-01-01T08:00:00Z",
        "updatedAt": "2025-01-02T08:00:00Z"
    });
    let todo: Todo = serde_json::from_value(explicit_null).unwrap();
    assert_eq!(todo.description, None);
    assert_eq!(todo.due_date, NaiveDate::from_ymd_opt(2025, 1, 10));

    let omitted = json!({
        "id": "7f2c1e80-33aa-4c2a-9e4e-0f5d1bb0a222",
        "title": "Sparse wire",
        "completed": true,
        "createdAt": "2025-01-01T08:00:00Z",
        "updatedAt": "2025-01-01T08:00:00Z"
    });
    let todo: Todo = serde_json::from_value(omitted).unwrap();
    assert_eq!(todo.description, None);
    assert_eq!(todo.priority, Priority::Medium);
    assert!(todo.tags.is_empty());
}
