//! Package content and health handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::StreamExt;

/// GET /content/{*key} - serve a stored artifact by key.
///
/// Streams straight from storage so large packages are never buffered in
/// memory.
#[tracing::instrument(skip(state))]
pub async fn get_content(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let (meta, stream) = state
        .repository
        .content_stream(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no content at key: {key}")))?;

    let body = Body::from_stream(
        stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string()))),
    );

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/octet-stream"),
            (CONTENT_LENGTH, &meta.size.to_string()),
        ],
        body,
    )
        .into_response())
}

/// GET /health - storage connectivity probe.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    state.repository.store().health_check().await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
