//! `/health` plus the behaviour every route gets from the middleware stack.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, fresh_app, get, send};

const DEV_ORIGIN: &str = "http://localhost:5173";

fn header<'a>(response: &'a axum::http::Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_backend_and_its_state() {
    let (app, _store) = fresh_app();
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "memory");
    assert_eq!(json["storageHealthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_is_not_under_the_api_prefix() {
    let (app, _store) = fresh_app();
    let response = get(app, "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Request ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_request_id_is_a_uuid() {
    let (app, _store) = fresh_app();
    let response = get(app, "/api/v1/get-all-todos").await;

    let id = header(&response, "x-request-id").expect("x-request-id header");
    assert!(uuid_like(id), "not a UUID: {id}");
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let (app, _store) = fresh_app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(header(&response, "x-request-id"), Some("trace-me-123"));
}

fn uuid_like(value: &str) -> bool {
    value.len() == 36 && value.chars().filter(|c| *c == '-').count() == 4
}

// ---------------------------------------------------------------------------
// CORS
// ---------------------------------------------------------------------------

#[tokio::test]
async fn preflight_from_configured_origin_is_allowed() {
    let (app, _store) = fresh_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/todos/00000000-0000-0000-0000-000000000000")
        .header("origin", DEV_ORIGIN)
        .header("access-control-request-method", "DELETE")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), Some(DEV_ORIGIN));
}

#[tokio::test]
async fn unlisted_origin_gets_no_cors_headers() {
    let (app, _store) = fresh_app();
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = send(app, request).await;
    assert!(header(&response, "access-control-allow-origin").is_none());
}
