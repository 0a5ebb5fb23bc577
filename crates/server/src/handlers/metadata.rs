//! Package metadata (registration) handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use berth_core::PackageId;
use berth_repository::RegistrationIndex;

/// GET /registrations/{id}/index.json - registration index for a package.
///
/// A package with no stored versions yields an empty document with zero
/// pages; a malformed id is a client error.
#[tracing::instrument(skip(state))]
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RegistrationIndex>> {
    let id = PackageId::parse(id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let index = state.registration.index(&id).await?;
    Ok(Json(index))
}
