use std::sync::Arc;

use todo_core::store::TodoStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage gateway every command and read model goes through.
    pub store: Arc<dyn TodoStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
