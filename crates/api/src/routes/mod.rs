pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /create-todo                                     create (POST)
/// /update-todo-details                             update details, id in body (POST)
/// /mark-todo-as-completed                          complete, id in body (POST)
/// /mark-todo-as-reopened                           reopen, id in body (POST)
/// /mark-todo-as-reopened/{todo_id}                 reopen (POST)
/// /todos/{todo_id}                                 update details (PATCH), delete (DELETE)
/// /todos/{todo_id}/complete                        complete (POST)
///
/// /get-all-todos                                   every todo (GET)
/// /get-active-todos                                status = Active (GET)
/// /get-completed-todos                             status = Completed (GET)
/// /get-todo-details                                detail view of every todo (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(todos::command_router())
        .merge(todos::read_model_router())
}
