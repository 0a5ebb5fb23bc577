//! Repository error types.

use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The pushed content is not a well-formed package.
    #[error("invalid package: {0}")]
    Package(#[from] berth_core::Error),

    /// Artifacts already exist for the pushed package version.
    #[error("package version already exists: {0}")]
    VersionAlreadyExists(String),

    /// A read addressed a package that is not stored.
    #[error("package not found: {0}")]
    NotFound(String),

    /// An existing versions index failed to parse. The index is never
    /// silently replaced.
    #[error("corrupt versions index at {key}: {message}")]
    CorruptIndex { key: String, message: String },

    /// A metadata document failed to serialize.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A blob store failure.
    #[error("storage error: {0}")]
    Storage(#[from] berth_storage::StorageError),
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
