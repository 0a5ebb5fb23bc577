//! Object storage abstraction and backends for Berth.
//!
//! This crate provides:
//! - The `ObjectStore` trait the repository is written against
//! - A local filesystem backend with atomic writes
//! - Key-scoped exclusive write sections (`ScopeLocks`)

pub mod backends;
pub mod error;
pub mod scope;
pub mod traits;

pub use backends::filesystem::FilesystemBackend;
pub use error::{StorageError, StorageResult};
pub use scope::ScopeLocks;
pub use traits::{ByteStream, ObjectMeta, ObjectStore};

use berth_core::config::StorageConfig;
use std::sync::Arc;

/// Create an object store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            Ok(Arc::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_from_config_filesystem() {
        let temp = tempdir().unwrap();
        let config = StorageConfig::Filesystem {
            path: temp.path().join("store"),
        };

        let store = from_config(&config).await.unwrap();
        assert_eq!(store.backend_name(), "filesystem");
        store.put("hello.txt", Bytes::from_static(b"hi")).await.unwrap();
        assert!(store.exists("hello.txt").await.unwrap());
        store.health_check().await.unwrap();
    }
}
