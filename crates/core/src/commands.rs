//! Mutating operations over the todo collection.
//!
//! Each command does one load (except create), one pure transition, and one
//! write through the [`TodoStore`]. There is no locking between the read and
//! the write: concurrent commands on the same todo resolve as last write wins.

use chrono::{SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::store::TodoStore;
use crate::todo::{CompletionDetails, DetailsPatch, NewTodo, ReopenDetails, Todo, TodoChange};
use crate::types::{Timestamp, TodoId};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Payload for the update-details command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoDetails {
    #[serde(rename = "todoID")]
    pub todo_id: Option<TodoId>,
    #[serde(flatten)]
    pub patch: DetailsPatch,
}

/// Payload for the reopen command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReopenTodo {
    #[serde(rename = "todoID")]
    pub todo_id: Option<TodoId>,
    #[serde(flatten)]
    pub details: ReopenDetails,
}

/// Payload for the delete command. Everything but the id is informational.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTodo {
    pub todo_id: Option<TodoId>,
    pub deletion_reason: Option<Value>,
    pub deletion_comment: Option<Value>,
    pub confirm_deletion: Option<Value>,
    pub retain_for_days: Option<Value>,
}

/// Receipt returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionReceipt {
    pub success: bool,
    pub deleted_id: TodoId,
    pub details: DeletionDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionDetails {
    pub deleted_count: u64,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Create a new `Active` todo with a freshly generated id.
pub async fn create_todo(store: &dyn TodoStore, input: NewTodo) -> Result<Todo, CoreError> {
    let todo = Todo::new(TodoId::new_v4(), input, now())?;
    store.insert(&todo).await?;

    tracing::info!(todo_id = %todo.id, status = %todo.status, "Todo created");
    Ok(todo)
}

/// Overwrite the provided detail fields of an existing todo.
pub async fn update_todo_details(
    store: &dyn TodoStore,
    input: UpdateTodoDetails,
) -> Result<Todo, CoreError> {
    let todo_id = input.todo_id.ok_or_else(|| {
        CoreError::Validation("Todo ID is required to update Todo details.".to_string())
    })?;

    apply_change(store, todo_id, TodoChange::Details(input.patch)).await
}

/// Transition an `Active` todo to `Completed`, recording the completion details.
pub async fn mark_todo_completed(
    store: &dyn TodoStore,
    todo_id: TodoId,
    details: CompletionDetails,
) -> Result<Todo, CoreError> {
    apply_change(store, todo_id, TodoChange::Complete(details)).await
}

/// Move a todo back to `Active` and clear its completion details.
pub async fn mark_todo_reopened(
    store: &dyn TodoStore,
    input: ReopenTodo,
) -> Result<Todo, CoreError> {
    let todo_id = input.todo_id.ok_or_else(|| {
        CoreError::Validation("Todo ID is required to reopen a todo.".to_string())
    })?;

    apply_change(store, todo_id, TodoChange::Reopen(input.details)).await
}

/// Permanently remove a todo.
pub async fn delete_todo(
    store: &dyn TodoStore,
    input: DeleteTodo,
) -> Result<DeletionReceipt, CoreError> {
    let todo_id = input.todo_id.ok_or_else(|| {
        CoreError::Validation("Todo ID must be provided to delete a specific todo.".to_string())
    })?;

    let deleted_count = store.remove(todo_id).await?;
    if deleted_count == 0 {
        return Err(CoreError::todo_not_found(todo_id));
    }

    tracing::info!(
        todo_id = %todo_id,
        deleted_count,
        reason = ?input.deletion_reason,
        comment = ?input.deletion_comment,
        confirmed = ?input.confirm_deletion,
        retain_for_days = ?input.retain_for_days,
        "Todo deleted",
    );

    Ok(DeletionReceipt {
        success: true,
        deleted_id: todo_id,
        details: DeletionDetails { deleted_count },
    })
}

/// Current time at the microsecond precision every backend can store.
fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Load, transition, persist.
async fn apply_change(
    store: &dyn TodoStore,
    todo_id: TodoId,
    change: TodoChange,
) -> Result<Todo, CoreError> {
    let current = store
        .find_by_id(todo_id)
        .await?
        .ok_or_else(|| CoreError::todo_not_found(todo_id))?;

    let operation = change.name();
    let next = current.apply(change, now())?;

    // The record can vanish between the read and the write.
    if !store.update(&next).await? {
        return Err(CoreError::todo_not_found(todo_id));
    }

    tracing::info!(todo_id = %todo_id, operation, status = %next.status, "Todo updated");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
