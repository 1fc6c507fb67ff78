//! Keyed handler registry.
//!
//! The single extension seam of the system: a small fixed set of
//! built-in handlers and an open set of pluggable ones, resolved by a
//! normalized string key. Registries are populated during process
//! initialization and read-only afterwards, so lookups need no
//! locking. Registration order never affects resolution, only key
//! presence does.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{WardenError, WardenResult};

/// A registry mapping normalized keys to handler implementations.
///
/// Keys are uppercased on BOTH registration and lookup, so mixed-case
/// keys behave uniformly. Whether an absent key is an error, a `None`,
/// or a fallback to a default handler is decided by the dispatcher
/// built on top of this registry.
pub struct HandlerRegistry<H: ?Sized> {
    handlers: HashMap<String, Arc<H>>,
}

impl<H: ?Sized> HandlerRegistry<H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under a key. The key is uppercased first.
    pub fn register(&mut self, key: impl AsRef<str>, handler: Arc<H>) {
        self.handlers
            .insert(key.as_ref().to_uppercase(), handler);
    }

    /// Look up a handler by key, uppercasing before the lookup.
    ///
    /// A missing (`None`) key is rejected with
    /// [`WardenError::InvalidArgument`]; an absent key yields
    /// `Ok(None)`.
    pub fn resolve(&self, key: Option<&str>) -> WardenResult<Option<Arc<H>>> {
        let key = key.ok_or_else(|| {
            WardenError::invalid_argument("dispatch key must be provided")
        })?;
        Ok(self.handlers.get(&key.to_uppercase()).cloned())
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(&key.to_uppercase())
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
