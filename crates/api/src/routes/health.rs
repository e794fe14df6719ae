//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store does not answer.
    pub status: &'static str,
    pub version: &'static str,
    /// Configured backend, `memory` or `postgres`.
    pub storage: &'static str,
    pub storage_healthy: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage_healthy = state
        .store
        .health_check()
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "Storage health check failed"))
        .is_ok();

    Json(HealthResponse {
        status: if storage_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        storage: state.config.storage.backend_name(),
        storage_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
