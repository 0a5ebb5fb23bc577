//! Package ingestion and read orchestration.

use crate::error::{RepositoryError, RepositoryResult};
use crate::versions::Versions;
use berth_core::{Nupkg, Nuspec, PackageId, PackageIdentity};
use berth_storage::{ByteStream, ObjectMeta, ObjectStore, ScopeLocks, StorageError};
use bytes::Bytes;
use std::sync::Arc;
use uuid::Uuid;

/// A NuGet package repository backed by an object store.
///
/// All mutation of a package's namespace happens inside the exclusive scope
/// keyed by the package id, which serializes the read-modify-write of the
/// versions index. The index is always the last write of a commit, so any
/// version visible in it has its `.nupkg`, `.nuspec` and hash artifacts in
/// place.
pub struct Repository {
    store: Arc<dyn ObjectStore>,
    scopes: ScopeLocks,
}

impl Repository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            scopes: ScopeLocks::new(),
        }
    }

    /// The underlying object store.
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Ingest a pushed package.
    ///
    /// The content is staged under a fresh random key, validated, and
    /// committed under the package's exclusive scope. On any failure the
    /// staged blob is removed on a best-effort basis.
    #[tracing::instrument(skip(self, content), fields(size = content.len()))]
    pub async fn add(&self, content: Bytes) -> RepositoryResult<PackageIdentity> {
        // The staged key lives outside any package namespace, so it cannot
        // collide with committed artifacts.
        let staged_key = Uuid::new_v4().to_string();
        self.store.put(&staged_key, content).await?;

        match self.ingest(&staged_key).await {
            Ok(identity) => {
                tracing::info!(identity = %identity, "package added");
                Ok(identity)
            }
            Err(err) => {
                if let Err(cleanup) = self.store.delete(&staged_key).await {
                    tracing::debug!(
                        key = %staged_key,
                        error = %cleanup,
                        "staged blob cleanup failed"
                    );
                }
                Err(err)
            }
        }
    }

    async fn ingest(&self, staged_key: &str) -> RepositoryResult<PackageIdentity> {
        // Read the staged bytes back and derive the package identity.
        let nupkg = Nupkg::new(self.store.get(staged_key).await?);
        let nuspec = nupkg.nuspec()?;
        let identity = nuspec.identity()?;

        // Uniqueness pre-check. This is an optimization only; the
        // authoritative check is redone inside the scope.
        if !self.store.list(&identity.root_key()).await?.is_empty() {
            return Err(RepositoryError::VersionAlreadyExists(identity.to_string()));
        }

        let scope_key = identity.id().root_key();
        self.scopes
            .exclusively(&scope_key, || async {
                self.commit(staged_key, &nupkg, &nuspec, &identity).await
            })
            .await?;

        Ok(identity)
    }

    /// Commit the staged package. Runs inside the package's exclusive scope.
    async fn commit(
        &self,
        staged_key: &str,
        nupkg: &Nupkg,
        nuspec: &Nuspec,
        identity: &PackageIdentity,
    ) -> RepositoryResult<()> {
        // Another writer may have committed between the pre-check and scope
        // entry.
        if !self.store.list(&identity.root_key()).await?.is_empty() {
            return Err(RepositoryError::VersionAlreadyExists(identity.to_string()));
        }

        let index = self.versions(identity.id()).await?;

        let result = self
            .write_artifacts(staged_key, nupkg, nuspec, identity, index)
            .await;
        if result.is_err() {
            self.remove_partial(identity).await;
        }
        result
    }

    async fn write_artifacts(
        &self,
        staged_key: &str,
        nupkg: &Nupkg,
        nuspec: &Nuspec,
        identity: &PackageIdentity,
        index: Versions,
    ) -> RepositoryResult<()> {
        let store = self.store.as_ref();
        tokio::try_join!(
            async {
                store
                    .rename(staged_key, &identity.nupkg_key())
                    .await
                    .map_err(RepositoryError::from)
            },
            async {
                store
                    .put(
                        &identity.hash_key(),
                        Bytes::from(nupkg.hash().to_base64()),
                    )
                    .await
                    .map_err(RepositoryError::from)
            },
            async {
                store
                    .put(&identity.nuspec_key(), nuspec.bytes())
                    .await
                    .map_err(RepositoryError::from)
            },
        )?;

        // The index write comes last: a reader that sees the version in the
        // index always finds the three artifacts above.
        let updated = index.add(identity.version().clone());
        updated
            .save(store, &identity.id().versions_key())
            .await
    }

    /// Best-effort removal of artifacts left by a failed commit.
    async fn remove_partial(&self, identity: &PackageIdentity) {
        match self.store.list(&identity.root_key()).await {
            Ok(keys) => {
                for key in keys {
                    if let Err(e) = self.store.delete(&key).await {
                        tracing::debug!(key = %key, error = %e, "partial artifact cleanup failed");
                    }
                }
            }
            Err(e) => {
                tracing::debug!(
                    identity = %identity,
                    error = %e,
                    "partial artifact listing failed"
                );
            }
        }
    }

    /// Raw content lookup by storage key.
    pub async fn content(&self, key: &str) -> RepositoryResult<Option<Bytes>> {
        match self.store.get(key).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Streaming content lookup by storage key, with object metadata.
    pub async fn content_stream(
        &self,
        key: &str,
    ) -> RepositoryResult<Option<(ObjectMeta, ByteStream)>> {
        let meta = match self.store.head(key).await {
            Ok(meta) => meta,
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stream = self.store.get_stream(key).await?;
        Ok(Some((meta, stream)))
    }

    /// The versions index of a package; empty if none is stored. A corrupt
    /// index is an error, never silently replaced.
    pub async fn versions(&self, id: &PackageId) -> RepositoryResult<Versions> {
        let key = id.versions_key();
        if !self.store.exists(&key).await? {
            return Ok(Versions::new());
        }
        let bytes = self.store.get(&key).await?;
        Versions::from_bytes(&key, &bytes)
    }

    /// The stored manifest of a package version.
    pub async fn nuspec(&self, identity: &PackageIdentity) -> RepositoryResult<Nuspec> {
        let key = identity.nuspec_key();
        if !self.store.exists(&key).await? {
            return Err(RepositoryError::NotFound(identity.to_string()));
        }
        Ok(Nuspec::new(self.store.get(&key).await?))
    }
}
