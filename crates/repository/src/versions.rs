//! The per-package versions index document.

use crate::error::{RepositoryError, RepositoryResult};
use berth_core::Version;
use berth_storage::ObjectStore;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The known versions of one package, as persisted at
/// `<id>/index.json`.
///
/// The on-disk list is always sorted ascending by version order and
/// deduplicated by normalized form. Concurrent updates are serialized by the
/// repository's exclusive scope.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Versions {
    versions: Vec<Version>,
}

impl Versions {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an index document. `key` is only used for error reporting.
    pub fn from_bytes(key: &str, bytes: &Bytes) -> RepositoryResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| RepositoryError::CorruptIndex {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// A new index containing the existing versions plus `version`, sorted
    /// ascending and deduplicated by normalized form.
    pub fn add(mut self, version: Version) -> Self {
        self.versions.push(version);
        self.versions.sort();
        self.versions
            .dedup_by(|a, b| a.normalized() == b.normalized());
        self
    }

    /// The sorted version list.
    pub fn all(&self) -> &[Version] {
        &self.versions
    }

    /// Whether no versions are recorded.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Serialize as the `{"versions":[...]}` document.
    pub fn to_bytes(&self) -> RepositoryResult<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Persist the index at `key`.
    pub async fn save(&self, store: &dyn ObjectStore, key: &str) -> RepositoryResult<()> {
        store.put(key, self.to_bytes()?).await?;
        Ok(())
    }
}
