//! Resource dispatch.
//!
//! Resolves a resource by opaque identifier through the repository
//! registered for its type tag (e.g. "user", "client"). There is no
//! default repository: an unregistered type is a valid outcome, not a
//! failure, so callers get `Ok(None)` and never an error.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use warden_core::{HandlerRegistry, TenantContext, WardenResult};

/// Externally supplied repository capable of resolving one resource
/// type by opaque identifier.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn find_resource_by_id(
        &self,
        ctx: &TenantContext,
        id: &str,
    ) -> WardenResult<Option<Value>>;
}

/// Dispatches resource lookups to the repository registered for the
/// resource type.
pub struct ResourceDispatcher {
    repositories: HandlerRegistry<dyn ResourceRepository>,
}

impl ResourceDispatcher {
    pub fn new() -> Self {
        Self {
            repositories: HandlerRegistry::new(),
        }
    }

    /// Register the repository responsible for `resource_type`.
    /// Populated once at initialization, read-only thereafter.
    pub fn register(
        &mut self,
        resource_type: impl AsRef<str>,
        repository: Arc<dyn ResourceRepository>,
    ) {
        self.repositories.register(resource_type, repository);
    }

    /// Resolve `id` through the repository for `resource_type`.
    ///
    /// Returns `Ok(None)` when the type is unregistered or the
    /// repository finds nothing.
    pub async fn get_resource(
        &self,
        ctx: &TenantContext,
        id: &str,
        resource_type: &str,
    ) -> WardenResult<Option<Value>> {
        let Some(repository) = self.repositories.resolve(Some(resource_type))? else {
            tracing::debug!(resource_type, "no repository registered for resource type");
            return Ok(None);
        };

        repository.find_resource_by_id(ctx, id).await
    }

    /// Registered resource type tags.
    pub fn resource_types(&self) -> Vec<String> {
        self.repositories.keys()
    }
}

impl Default for ResourceDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct UserRepository;

    #[async_trait]
    impl ResourceRepository for UserRepository {
        async fn find_resource_by_id(
            &self,
            _ctx: &TenantContext,
            id: &str,
        ) -> WardenResult<Option<Value>> {
            Ok(match id {
                "u-1" => Some(json!({"id": "u-1", "login": "jdoe"})),
                _ => None,
            })
        }
    }

    fn dispatcher() -> ResourceDispatcher {
        let mut d = ResourceDispatcher::new();
        d.register("user", Arc::new(UserRepository));
        d
    }

    #[tokio::test]
    async fn registered_type_resolves_a_resource() {
        let ctx = TenantContext::new();
        let resource = dispatcher()
            .get_resource(&ctx, "u-1", "user")
            .await
            .unwrap();
        assert_eq!(resource, Some(json!({"id": "u-1", "login": "jdoe"})));
    }

    #[tokio::test]
    async fn unregistered_type_is_absent_not_an_error() {
        let ctx = TenantContext::new();
        let resource = dispatcher()
            .get_resource(&ctx, "u-1", "unknown")
            .await
            .unwrap();
        assert_eq!(resource, None);
    }

    #[tokio::test]
    async fn repository_miss_is_absent() {
        let ctx = TenantContext::new();
        let resource = dispatcher()
            .get_resource(&ctx, "u-404", "user")
            .await
            .unwrap();
        assert_eq!(resource, None);
    }
}
