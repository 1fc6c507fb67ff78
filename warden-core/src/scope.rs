//! Per-request scope.
//!
//! Request-scoped state (tenant binding, caches) is acquired at
//! request entry and must be torn down on every exit path: success,
//! business error, or fault. `RequestScope` expresses that as a guard
//! whose `Drop` clears both, so a pooled worker never carries one
//! tenant's state into the next request it serves.

use std::sync::Arc;

use crate::cache::RequestScopedCacheManager;
use crate::tenant::{TenantContext, TenantInfo};

/// Owns a request's tenant binding and cache registry.
///
/// Sub-operations of the request share the inner context and manager
/// through the `Arc`s returned by [`tenant`](Self::tenant) and
/// [`caches`](Self::caches); clones stay readable after the scope
/// drops, but observe the cleared state.
#[derive(Debug)]
pub struct RequestScope {
    tenant: Arc<TenantContext>,
    caches: Arc<RequestScopedCacheManager>,
}

impl RequestScope {
    /// Open a scope with no tenant bound yet. Used when tenant
    /// resolution itself happens inside the scope.
    pub fn new() -> Self {
        Self {
            tenant: Arc::new(TenantContext::new()),
            caches: Arc::new(RequestScopedCacheManager::new()),
        }
    }

    /// Open a scope and bind the resolved tenant in one step.
    pub fn enter(info: TenantInfo) -> Self {
        let scope = Self::new();
        tracing::debug!(tenant = %info.tenant_id, "entering request scope");
        scope.tenant.bind(info);
        scope
    }

    pub fn tenant(&self) -> &Arc<TenantContext> {
        &self.tenant
    }

    pub fn caches(&self) -> &Arc<RequestScopedCacheManager> {
        &self.caches
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.tenant.clear();
        self.caches.clear_caches();
        tracing::debug!("request scope torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WardenError;

    fn info() -> TenantInfo {
        TenantInfo::builder("acme")
            .protocol("http")
            .domain("acme.example.com")
            .port("80")
            .build()
    }

    #[test]
    fn drop_clears_tenant_and_caches() {
        let scope = RequestScope::enter(info());
        let tenant = scope.tenant().clone();
        let caches = scope.caches().clone();

        caches.get_cache("users");
        assert!(tenant.is_bound());

        drop(scope);

        assert_eq!(tenant.current(), Err(WardenError::NoTenantResolved));
        assert!(caches.cache_names().is_empty());
    }
}
