//! Handlers for the read-only todo projections.

use axum::extract::State;
use axum::Json;
use todo_core::read_models::{self, ActiveTodo, CompletedTodo, TodoDetails, TodoSummary};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/get-all-todos
pub async fn get_all_todos(State(state): State<AppState>) -> AppResult<Json<Vec<TodoSummary>>> {
    let rows = read_models::get_all_todos(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// GET /api/v1/get-active-todos
pub async fn get_active_todos(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActiveTodo>>> {
    let rows = read_models::get_active_todos(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// GET /api/v1/get-completed-todos
pub async fn get_completed_todos(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CompletedTodo>>> {
    let rows = read_models::get_completed_todos(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// GET /api/v1/get-todo-details
pub async fn get_todo_details(State(state): State<AppState>) -> AppResult<Json<Vec<TodoDetails>>> {
    let rows = read_models::get_todo_details(state.store.as_ref()).await?;
    Ok(Json(rows))
}
