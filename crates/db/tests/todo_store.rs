//! Integration tests for the PostgreSQL todo gateway.
//!
//! Exercises [`PgTodoStore`] against a real database:
//! - Insert / find round trip, including verbatim JSON completion fields
//! - Natural ordering and status filtering in `find_all`
//! - Update and remove reporting whether a row matched
//!
//! These need `DATABASE_URL` pointing at a scratch server, so they are
//! ignored by default. Run with `cargo test -p todo-db -- --ignored`.

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use todo_core::commands::create_todo;
use todo_core::store::TodoStore;
use todo_core::todo::{CompletionDetails, NewTodo, Todo, TodoChange, TodoStatus};
use todo_core::types::TodoId;
use todo_db::PgTodoStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_todo(title: &str, offset_secs: i64) -> Todo {
    Todo::new(
        TodoId::new_v4(),
        NewTodo {
            title: Some(title.to_string()),
            due_date: Some("2025-08-15".to_string()),
            priority: Some("Medium".to_string()),
            ..Default::default()
        },
        Utc::now() + Duration::seconds(offset_secs),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn insert_then_find_round_trips(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    let todo = new_todo("Buy milk", 0);
    store.insert(&todo).await.unwrap();

    let found = store.find_by_id(todo.id).await.unwrap().unwrap();
    assert_eq!(found.id, todo.id);
    assert_eq!(found.title, "Buy milk");
    assert_eq!(found.due_date, todo.due_date);
    assert_eq!(found.status, TodoStatus::Active);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_missing_returns_none(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    assert!(store.find_by_id(TodoId::new_v4()).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn completion_fields_are_stored_verbatim(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    let todo = new_todo("Mow lawn", 0);
    store.insert(&todo).await.unwrap();

    let completed = todo
        .apply(
            TodoChange::Complete(CompletionDetails {
                completion_notes: Some(json!("done")),
                actual_completion_date: Some(json!(20250814)),
                time_spent_minutes: Some(json!("30")),
                satisfaction_rating: Some(json!(4)),
            }),
            Utc::now(),
        )
        .unwrap();
    assert!(store.update(&completed).await.unwrap());

    let found = store.find_by_id(completed.id).await.unwrap().unwrap();
    assert_eq!(found.status, TodoStatus::Completed);
    assert_eq!(found.time_spent_minutes, Some(json!("30")));
    assert_eq!(found.satisfaction_rating, Some(json!(4)));
    assert_eq!(found.actual_completion_date, Some(json!(20250814)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn created_todo_reads_back_identically(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    let input: NewTodo = serde_json::from_value(json!({
        "title": "Buy milk",
        "confirmDeletion": "true",
        "retainForDays": "0"
    }))
    .unwrap();
    let created = create_todo(&store, input).await.unwrap();

    let found = store.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.confirm_deletion, Some(json!("true")));
    assert_eq!(found.retain_for_days, Some(json!("0")));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_all_orders_by_creation_and_filters(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    let first = new_todo("first", 0);
    let mut second = new_todo("second", 10);
    second.status = TodoStatus::Completed;
    // Insert out of order; creation time decides.
    store.insert(&second).await.unwrap();
    store.insert(&first).await.unwrap();

    let all: Vec<_> = store
        .find_all(None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(all, vec![first.id, second.id]);

    let completed = store.find_all(Some(TodoStatus::Completed)).await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, second.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_and_remove_report_matches(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    let ghost = new_todo("never stored", 0);
    assert!(!store.update(&ghost).await.unwrap());

    let todo = new_todo("Delete me", 0);
    store.insert(&todo).await.unwrap();
    assert_eq!(store.remove(todo.id).await.unwrap(), 1);
    assert_eq!(store.remove(todo.id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_passes(pool: PgPool) {
    let store = PgTodoStore::new(pool);
    store.health_check().await.unwrap();
}
