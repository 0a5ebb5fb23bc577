//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use berth_repository::RepositoryError;
use berth_storage::StorageError;
use serde::Serialize;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal_error",
            Self::Repository(e) => match e {
                RepositoryError::Package(_) => "invalid_package",
                RepositoryError::VersionAlreadyExists(_) => "version_already_exists",
                RepositoryError::NotFound(_) => "not_found",
                RepositoryError::CorruptIndex { .. } => "corrupt_index",
                RepositoryError::Serialize(_) => "internal_error",
                RepositoryError::Storage(_) => "storage_error",
            },
            Self::Storage(_) => "storage_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Repository(e) => match e {
                RepositoryError::Package(_) => StatusCode::BAD_REQUEST,
                RepositoryError::VersionAlreadyExists(_) => StatusCode::CONFLICT,
                RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
                RepositoryError::CorruptIndex { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                RepositoryError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
                RepositoryError::Storage(e) => storage_status(e),
            },
            Self::Storage(e) => storage_status(e),
        }
    }
}

fn storage_status(e: &StorageError) -> StatusCode {
    match e {
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::InvalidKey(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use berth_core::Error;

    #[test]
    fn test_publish_status_mapping() {
        let invalid: ApiError =
            RepositoryError::Package(Error::InvalidVersion("1".to_string())).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code(), "invalid_package");

        let conflict: ApiError =
            RepositoryError::VersionAlreadyExists("foo:1.0.0".to_string()).into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let corrupt: ApiError = RepositoryError::CorruptIndex {
            key: "foo/index.json".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(corrupt.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_status_mapping() {
        let missing: ApiError = StorageError::NotFound("k".to_string()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let invalid: ApiError = StorageError::InvalidKey("../k".to_string()).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
