//! Server test utilities.

use berth_core::config::{AppConfig, ServerConfig, StorageConfig};
use berth_server::{create_router, AppState};
use berth_storage::{FilesystemBackend, ObjectStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    storage_path: PathBuf,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let storage_path = temp_dir.path().join("storage");
        let storage: Arc<dyn ObjectStore> = Arc::new(
            FilesystemBackend::new(&storage_path)
                .await
                .expect("Failed to create storage backend"),
        );

        let config = AppConfig {
            server: ServerConfig {
                public_url: "http://feed.test".to_string(),
                ..Default::default()
            },
            storage: StorageConfig::Filesystem {
                path: storage_path.clone(),
            },
        };

        let state = AppState::new(config, storage);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            storage_path,
            _temp_dir: temp_dir,
        }
    }

    /// Direct access to the underlying object store.
    pub fn store(&self) -> Arc<dyn ObjectStore> {
        self.state.repository.store().clone()
    }

    /// Filesystem root of the store, for asserting on raw layout.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}
