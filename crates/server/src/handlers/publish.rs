//! Package publish handlers.
//!
//! See the package-publish resource in the NuGet v3 protocol: a package is
//! pushed as the first part of a `multipart/form-data` body.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

/// PUT /package - push a new package.
#[tracing::instrument(skip(state, multipart))]
pub async fn put_package(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<StatusCode> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError::BadRequest("multipart body has no parts".to_string()))?;

    let content = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read package body: {e}")))?;

    let identity = state.repository.add(content).await?;
    tracing::debug!(identity = %identity, "push accepted");
    Ok(StatusCode::CREATED)
}

/// GET /package - the publish resource does not serve reads.
pub async fn package_method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
