#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use todo_api::config::{LogFormat, ServerConfig, StorageConfig};
use todo_api::router::build_app_router;
use todo_api::state::AppState;
use todo_core::store::InMemoryTodoStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageConfig::Memory,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(store: Arc<InMemoryTodoStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh store plus a router over it.
pub fn fresh_app() -> (Router, Arc<InMemoryTodoStore>) {
    let store = Arc::new(InMemoryTodoStore::new());
    (build_test_app(Arc::clone(&store)), store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a todo through the API and return its JSON representation.
pub async fn create(app: Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, "/api/v1/create-todo", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}
