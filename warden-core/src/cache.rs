//! Request-scoped caches.
//!
//! A [`RequestScopedCacheManager`] is created fresh for every inbound
//! request and discarded with it (see [`crate::RequestScope`]), so no
//! cached entry ever survives into another request. It exists purely
//! to avoid recomputation within one request's processing graph; it is
//! not a cross-request caching layer.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// A small concurrent key/value cache.
///
/// Records are untyped [`Value`]s, matching how the auth layer carries
/// authentication results and resources.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        self.entries.write().insert(key.into(), value);
    }

    pub fn evict(&self, key: &str) -> Option<Value> {
        self.entries.write().remove(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Registry of named caches bound to one request's lifetime.
#[derive(Debug, Default)]
pub struct RequestScopedCacheManager {
    caches: RwLock<HashMap<String, Arc<RequestCache>>>,
}

impl RequestScopedCacheManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache registered under `name`, created lazily on first use.
    ///
    /// Idempotent under concurrent sub-operations of the same request:
    /// at most one cache instance exists per name per manager.
    pub fn get_cache(&self, name: &str) -> Arc<RequestCache> {
        if let Some(cache) = self.caches.read().get(name) {
            return cache.clone();
        }

        let mut caches = self.caches.write();
        // Re-check under the write lock: another sub-operation may
        // have created the cache between our two lock acquisitions.
        caches
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(cache = name, "creating request-scoped cache");
                Arc::new(RequestCache::new())
            })
            .clone()
    }

    /// Names of all caches created so far.
    pub fn cache_names(&self) -> Vec<String> {
        self.caches.read().keys().cloned().collect()
    }

    /// Discard every cache. Called when the owning request ends.
    pub fn clear_caches(&self) {
        self.caches.write().clear();
    }
}
