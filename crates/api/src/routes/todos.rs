//! Route definitions for todo commands and read models.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{read_models, todos};
use crate::state::AppState;

/// Mutating endpoints.
///
/// ```text
/// POST   /create-todo                       -> create_todo
/// POST   /update-todo-details               -> update_todo_details
/// POST   /mark-todo-as-completed            -> mark_completed_by_body
/// POST   /mark-todo-as-reopened             -> mark_reopened_by_body
/// POST   /mark-todo-as-reopened/{todo_id}   -> mark_reopened
/// PATCH  /todos/{todo_id}                   -> update_todo
/// DELETE /todos/{todo_id}                   -> delete_todo
/// POST   /todos/{todo_id}/complete          -> mark_completed
/// ```
pub fn command_router() -> Router<AppState> {
    Router::new()
        .route("/create-todo", post(todos::create_todo))
        .route("/update-todo-details", post(todos::update_todo_details))
        .route("/mark-todo-as-completed", post(todos::mark_completed_by_body))
        .route("/mark-todo-as-reopened", post(todos::mark_reopened_by_body))
        .route("/mark-todo-as-reopened/{todo_id}", post(todos::mark_reopened))
        .route(
            "/todos/{todo_id}",
            patch(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/todos/{todo_id}/complete", post(todos::mark_completed))
}

/// Read-only projections.
///
/// ```text
/// GET /get-all-todos        -> get_all_todos
/// GET /get-active-todos     -> get_active_todos
/// GET /get-completed-todos  -> get_completed_todos
/// GET /get-todo-details     -> get_todo_details
/// ```
pub fn read_model_router() -> Router<AppState> {
    Router::new()
        .route("/get-all-todos", get(read_models::get_all_todos))
        .route("/get-active-todos", get(read_models::get_active_todos))
        .route("/get-completed-todos", get(read_models::get_completed_todos))
        .route("/get-todo-details", get(read_models::get_todo_details))
}
