//! Query-side projections over stored todos.
//!
//! Read models never write. Each one fetches from the [`TodoStore`] and
//! reshapes the entities into the view its endpoint returns.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::store::TodoStore;
use crate::todo::{Todo, TodoStatus};
use crate::types::{Timestamp, TodoId};

/// Row of `get-all-todos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSummary {
    #[serde(rename = "todoID")]
    pub todo_id: TodoId,
    pub existing_todo_title: String,
    pub status: TodoStatus,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub created_date: String,
}

/// Row of `get-active-todos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTodo {
    #[serde(rename = "todoID")]
    pub todo_id: TodoId,
    pub todo_title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub created_date: String,
    pub current_status: TodoStatus,
}

/// Row of `get-completed-todos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTodo {
    #[serde(rename = "todoID")]
    pub todo_id: TodoId,
    pub todo_title: String,
    pub completion_date: Option<Value>,
    pub completion_notes: Option<Value>,
    pub original_due_date: Option<NaiveDate>,
    pub current_status: TodoStatus,
}

/// Row of `get-todo-details`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDetails {
    #[serde(rename = "todoID")]
    pub todo_id: TodoId,
    pub todo_title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TodoStatus,
    pub created_date: String,
    pub last_modified_date: String,
}

fn iso(ts: Timestamp) -> String {
    ts.to_rfc3339()
}

impl From<Todo> for TodoSummary {
    fn from(todo: Todo) -> Self {
        Self {
            todo_id: todo.id,
            existing_todo_title: todo.title,
            status: todo.status,
            due_date: todo.due_date,
            priority: todo.priority,
            created_date: iso(todo.created_at),
        }
    }
}

impl From<Todo> for ActiveTodo {
    fn from(todo: Todo) -> Self {
        Self {
            todo_id: todo.id,
            todo_title: todo.title,
            due_date: todo.due_date,
            priority: todo.priority,
            created_date: iso(todo.created_at),
            current_status: todo.status,
        }
    }
}

impl From<Todo> for CompletedTodo {
    fn from(todo: Todo) -> Self {
        Self {
            todo_id: todo.id,
            todo_title: todo.title,
            completion_date: todo.actual_completion_date,
            completion_notes: todo.completion_notes,
            original_due_date: todo.due_date,
            current_status: todo.status,
        }
    }
}

impl From<Todo> for TodoDetails {
    fn from(todo: Todo) -> Self {
        Self {
            todo_id: todo.id,
            todo_title: todo.title,
            description: todo.description,
            due_date: todo.due_date,
            status: todo.status,
            created_date: iso(todo.created_at),
            last_modified_date: iso(todo.updated_at),
        }
    }
}

/// Every todo, summarized.
pub async fn get_all_todos(store: &dyn TodoStore) -> Result<Vec<TodoSummary>, CoreError> {
    let todos = store.find_all(None).await?;
    Ok(todos.into_iter().map(TodoSummary::from).collect())
}

/// Todos whose status is `Active`.
///
/// Filtered in memory after an unfiltered fetch.
pub async fn get_active_todos(store: &dyn TodoStore) -> Result<Vec<ActiveTodo>, CoreError> {
    let todos = store.find_all(None).await?;
    Ok(todos
        .into_iter()
        .filter(|todo| todo.status == TodoStatus::Active)
        .map(ActiveTodo::from)
        .collect())
}

/// Todos whose status is `Completed`. The filter is pushed to storage.
pub async fn get_completed_todos(
    store: &dyn TodoStore,
) -> Result<Vec<CompletedTodo>, CoreError> {
    let todos = store.find_all(Some(TodoStatus::Completed)).await?;
    Ok(todos.into_iter().map(CompletedTodo::from).collect())
}

/// Detail view of every todo.
pub async fn get_todo_details(store: &dyn TodoStore) -> Result<Vec<TodoDetails>, CoreError> {
    let todos = store.find_all(None).await?;
    Ok(todos.into_iter().map(TodoDetails::from).collect())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::commands::{create_todo, mark_todo_completed};
    use crate::store::InMemoryTodoStore;
    use crate::todo::{CompletionDetails, NewTodo};

    async fn seeded_store() -> (InMemoryTodoStore, Todo, Todo) {
        let store = InMemoryTodoStore::new();
        let open = create_todo(
            &store,
            NewTodo {
                title: Some("Water plants".to_string()),
                due_date: Some("2025-08-15".to_string()),
                priority: Some("High".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let done = create_todo(
            &store,
            NewTodo {
                title: Some("Buy milk".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let done = mark_todo_completed(
            &store,
            done.id,
            CompletionDetails {
                completion_notes: Some(json!("done")),
                actual_completion_date: Some(json!("2025-01-01")),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (store, open, done)
    }

    #[tokio::test]
    async fn all_todos_lists_everything_in_order() {
        let (store, open, done) = seeded_store().await;
        let rows = get_all_todos(&store).await.unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.todo_id).collect();
        assert_eq!(ids, vec![open.id, done.id]);
        assert_eq!(rows[0].existing_todo_title, "Water plants");
        assert_eq!(rows[1].status, TodoStatus::Completed);
    }

    #[tokio::test]
    async fn active_todos_only_include_active() {
        let (store, open, _) = seeded_store().await;
        let rows = get_active_todos(&store).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].todo_id, open.id);
        assert_eq!(rows[0].current_status, TodoStatus::Active);
        assert_eq!(rows[0].priority.as_deref(), Some("High"));
    }

    #[tokio::test]
    async fn completed_todos_only_include_completed() {
        let (store, _, done) = seeded_store().await;
        let rows = get_completed_todos(&store).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].todo_id, done.id);
        assert_eq!(rows[0].completion_date, Some(json!("2025-01-01")));
        assert_eq!(rows[0].completion_notes, Some(json!("done")));
    }

    #[tokio::test]
    async fn read_models_do_not_mutate_storage() {
        let (store, _, _) = seeded_store().await;
        let before = store.find_all(None).await.unwrap();

        for _ in 0..2 {
            get_all_todos(&store).await.unwrap();
            get_active_todos(&store).await.unwrap();
            get_completed_todos(&store).await.unwrap();
            get_todo_details(&store).await.unwrap();
        }

        assert_eq!(store.find_all(None).await.unwrap(), before);
    }

    #[test]
    fn details_row_renders_timestamps_and_nulls() {
        let now = Utc::now();
        let todo = Todo::new(
            TodoId::new_v4(),
            NewTodo {
                title: Some("Plain".to_string()),
                ..Default::default()
            },
            now,
        )
        .unwrap();

        let json = serde_json::to_value(TodoDetails::from(todo.clone())).unwrap();
        assert_eq!(json["todoID"], json!(todo.id));
        assert_eq!(json["todoTitle"], "Plain");
        assert_eq!(json["createdDate"], now.to_rfc3339());
        assert_eq!(json["lastModifiedDate"], now.to_rfc3339());
        assert!(json["description"].is_null());
        assert!(json["dueDate"].is_null());
    }
}
