//! Handlers for the todo commands.
//!
//! Most commands are reachable two ways: with the todo id in the path, or
//! with a `todoID` field in the JSON body (the older RPC-style endpoints).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use todo_core::commands::{self, DeleteTodo, ReopenTodo, UpdateTodoDetails};
use todo_core::error::CoreError;
use todo_core::todo::{CompletionDetails, DetailsPatch, NewTodo, ReopenDetails};
use todo_core::types::TodoId;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams, TodoPath};
use crate::state::AppState;

/// Body of `POST /mark-todo-as-completed`.
#[derive(Debug, Default, Deserialize)]
pub struct MarkCompletedRequest {
    #[serde(rename = "todoID")]
    pub todo_id: Option<TodoId>,
    #[serde(flatten)]
    pub details: CompletionDetails,
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

/// POST /api/v1/create-todo
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewTodo>,
) -> AppResult<impl IntoResponse> {
    let todo = commands::create_todo(state.store.as_ref(), input).await?;
    Ok(Json(todo))
}

/// PATCH /api/v1/todos/{todo_id}
pub async fn update_todo(
    State(state): State<AppState>,
    TodoPath(todo_id): TodoPath,
    JsonBody(patch): JsonBody<DetailsPatch>,
) -> AppResult<impl IntoResponse> {
    let input = UpdateTodoDetails {
        todo_id: Some(todo_id),
        patch,
    };
    let todo = commands::update_todo_details(state.store.as_ref(), input).await?;
    Ok(Json(todo))
}

/// POST /api/v1/update-todo-details
pub async fn update_todo_details(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UpdateTodoDetails>,
) -> AppResult<impl IntoResponse> {
    let todo = commands::update_todo_details(state.store.as_ref(), input).await?;
    Ok(Json(todo))
}

// ---------------------------------------------------------------------------
// Complete / reopen
// ---------------------------------------------------------------------------

/// POST /api/v1/todos/{todo_id}/complete
pub async fn mark_completed(
    State(state): State<AppState>,
    TodoPath(todo_id): TodoPath,
    JsonBody(details): JsonBody<CompletionDetails>,
) -> AppResult<impl IntoResponse> {
    let todo = commands::mark_todo_completed(state.store.as_ref(), todo_id, details).await?;
    Ok(Json(todo))
}

/// POST /api/v1/mark-todo-as-completed
pub async fn mark_completed_by_body(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<MarkCompletedRequest>,
) -> AppResult<impl IntoResponse> {
    let todo_id = input.todo_id.ok_or_else(|| {
        CoreError::Validation("Todo ID is required to mark a todo as completed.".to_string())
    })?;
    let todo =
        commands::mark_todo_completed(state.store.as_ref(), todo_id, input.details).await?;
    Ok(Json(todo))
}

/// POST /api/v1/mark-todo-as-reopened/{todo_id}
pub async fn mark_reopened(
    State(state): State<AppState>,
    TodoPath(todo_id): TodoPath,
    JsonBody(details): JsonBody<ReopenDetails>,
) -> AppResult<impl IntoResponse> {
    let input = ReopenTodo {
        todo_id: Some(todo_id),
        details,
    };
    let todo = commands::mark_todo_reopened(state.store.as_ref(), input).await?;
    Ok(Json(todo))
}

/// POST /api/v1/mark-todo-as-reopened
pub async fn mark_reopened_by_body(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ReopenTodo>,
) -> AppResult<impl IntoResponse> {
    let todo = commands::mark_todo_reopened(state.store.as_ref(), input).await?;
    Ok(Json(todo))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/todos/{todo_id}
///
/// Optional `deletionReason`, `deletionComment`, `confirmDeletion` and
/// `retainForDays` query parameters are recorded in the log only.
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoPath(todo_id): TodoPath,
    QueryParams(mut input): QueryParams<DeleteTodo>,
) -> AppResult<impl IntoResponse> {
    input.todo_id = Some(todo_id);
    let receipt = commands::delete_todo(state.store.as_ref(), input).await?;

    tracing::debug!(deleted_id = %receipt.deleted_id, "Delete receipt issued");

    Ok(StatusCode::NO_CONTENT)
}
