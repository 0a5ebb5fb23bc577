//! Storage trait definitions.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for streaming reads.
pub type ByteStream = Pin<Box<dyn Stream<Item = StorageResult<Bytes>> + Send>>;

/// Object store abstraction over a flat key namespace.
///
/// Keys use `/` separators; `list` treats a key as a prefix of the
/// namespace. Every method may suspend, and no caller may assume any of
/// them is instantaneous.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Check if an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get an object's content.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Get an object as a byte stream.
    async fn get_stream(&self, key: &str) -> StorageResult<ByteStream>;

    /// Get an object's metadata without fetching content.
    async fn head(&self, key: &str) -> StorageResult<ObjectMeta>;

    /// Put an object atomically, replacing any previous content.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete an object.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// List object keys under a prefix. A missing prefix yields an empty
    /// listing.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Atomically rename an object to a new key.
    async fn rename(&self, from: &str, to: &str) -> StorageResult<()>;

    /// Get the name of this storage backend, for logging.
    fn backend_name(&self) -> &'static str;

    /// Verify storage backend connectivity.
    ///
    /// Called during server startup so misconfiguration is caught before
    /// requests are accepted.
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// Metadata about a stored object.
#[derive(Clone, Debug)]
pub struct ObjectMeta {
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time (if available).
    pub last_modified: Option<time::OffsetDateTime>,
}
