//! Key-scoped exclusive write sections.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serializes writers that share a scope key.
///
/// At most one closure passed to [`ScopeLocks::exclusively`] runs per key at
/// a time; a later scope on the same key observes all effects of the
/// previous one. Scopes with different keys are independent, and readers
/// never take a scope.
#[derive(Default)]
pub struct ScopeLocks {
    scopes: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ScopeLocks {
    /// Create an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `section` with exclusive access to `key`.
    pub async fn exclusively<T, F, Fut>(&self, key: &str, section: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let handle = {
            let mut scopes = self.scopes.lock().await;
            scopes.entry(key.to_string()).or_default().clone()
        };

        let result = {
            let _guard = handle.lock().await;
            section().await
        };

        // Prune the entry once no other holder remains. The map lock is
        // taken first, so a concurrent acquirer either cloned the handle
        // already (strong count > 2) or has not seen it yet.
        let mut scopes = self.scopes.lock().await;
        if let Some(entry) = scopes.get(key) {
            if Arc::strong_count(entry) == 2 {
                scopes.remove(key);
            }
        }
        drop(scopes);

        result
    }

    /// Number of keys currently tracked. Test instrumentation.
    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.scopes.lock().await.len()
    }
}
