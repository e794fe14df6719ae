//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every failure carries the JSON error body.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use todo_core::types::TodoId;

use crate::error::AppError;

/// JSON request body. An empty body deserializes to `T::default()`, so
/// endpoints whose fields are all optional accept a bare POST.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
    }
}

/// The `{todo_id}` path segment, parsed as a UUID.
#[derive(Debug, Clone, Copy)]
pub struct TodoPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(todo_id) = Path::<TodoId>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid todo id: {}", e.body_text())))?;
        Ok(Self(todo_id))
    }
}

/// Query string parameters.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(params))
    }
}
