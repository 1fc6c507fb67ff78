//! Tenant identity types.
//!
//! A [`TenantInfo`] is built once per inbound request from request
//! metadata and is read-only afterwards. The [`TenantContext`] holds
//! at most one `TenantInfo` per logical request and is passed into
//! services, dispatchers, and stores so that all logic is explicitly
//! tenant-aware; it is never a process-wide ambient global.

use parking_lot::RwLock;

use crate::errors::{WardenError, WardenResult};

/// Port value that is omitted from resolved application URLs.
pub const DEFAULT_HTTP_PORT: &str = "80";

/// Immutable per-request tenant identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantInfo {
    pub tenant_id: String,
    pub user_login: String,
    pub user_key: String,
    pub protocol: String,
    pub domain: String,
    pub port: String,
    /// Externally configured webapp base URL, if any. When present and
    /// non-blank it wins over the protocol/domain/port triple.
    pub webapp: Option<String>,
}

impl TenantInfo {
    /// Start building a `TenantInfo` for the given tenant.
    pub fn builder(tenant_id: impl Into<String>) -> TenantInfoBuilder {
        TenantInfoBuilder::new(tenant_id)
    }

    /// Base URL of the application serving this tenant.
    ///
    /// When `webapp` is blank, builds `protocol://domain[:port]`,
    /// omitting the port segment only when the port string-equals
    /// `"80"`. The comparison is a literal string compare: an empty or
    /// malformed port still produces a port segment.
    pub fn resolve_application_url(&self) -> String {
        if let Some(webapp) = self.webapp.as_deref() {
            if !webapp.trim().is_empty() {
                return webapp.to_string();
            }
        }

        if self.port == DEFAULT_HTTP_PORT {
            format!("{}://{}", self.protocol, self.domain)
        } else {
            format!("{}://{}:{}", self.protocol, self.domain, self.port)
        }
    }
}

/// Builder for [`TenantInfo`].
#[derive(Debug, Clone, Default)]
pub struct TenantInfoBuilder {
    tenant_id: String,
    user_login: String,
    user_key: String,
    protocol: String,
    domain: String,
    port: String,
    webapp: Option<String>,
}

impl TenantInfoBuilder {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            ..Default::default()
        }
    }

    pub fn user_login(mut self, login: impl Into<String>) -> Self {
        self.user_login = login.into();
        self
    }

    pub fn user_key(mut self, key: impl Into<String>) -> Self {
        self.user_key = key.into();
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn webapp(mut self, webapp: impl Into<String>) -> Self {
        self.webapp = Some(webapp.into());
        self
    }

    pub fn build(self) -> TenantInfo {
        TenantInfo {
            tenant_id: self.tenant_id,
            user_login: self.user_login,
            user_key: self.user_key,
            protocol: self.protocol,
            domain: self.domain,
            port: self.port,
            webapp: self.webapp,
        }
    }
}

/// Request-scoped holder of the active tenant identity.
///
/// Each in-flight request owns exactly one `TenantContext` (usually
/// inside a [`crate::RequestScope`]); concurrent requests never share
/// one. Interior mutability lets concurrent sub-operations of the same
/// request read it through a shared `Arc`.
#[derive(Debug, Default)]
pub struct TenantContext {
    current: RwLock<Option<TenantInfo>>,
}

impl TenantContext {
    /// Create an unbound context ("no tenant resolved yet").
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `info` as the active tenant for this request.
    ///
    /// Called once at request entry; the binding is not updated
    /// mid-request, so all subsequent reads observe the same value.
    pub fn bind(&self, info: TenantInfo) {
        *self.current.write() = Some(info);
    }

    /// The active tenant, or [`WardenError::NoTenantResolved`] when no
    /// binding has been established.
    pub fn current(&self) -> WardenResult<TenantInfo> {
        self.current
            .read()
            .clone()
            .ok_or(WardenError::NoTenantResolved)
    }

    /// Whether a tenant has been bound.
    pub fn is_bound(&self) -> bool {
        self.current.read().is_some()
    }

    /// Remove the binding. Mandatory on every request exit path so a
    /// pooled worker never leaks one tenant's identity into the next
    /// request it serves.
    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(protocol: &str, domain: &str, port: &str) -> TenantInfo {
        TenantInfo::builder("acme")
            .user_login("jdoe")
            .user_key("u-1")
            .protocol(protocol)
            .domain(domain)
            .port(port)
            .build()
    }

    #[test]
    fn url_omits_default_http_port() {
        assert_eq!(
            info("http", "acme.example.com", "80").resolve_application_url(),
            "http://acme.example.com"
        );
    }

    #[test]
    fn url_includes_non_default_ports() {
        assert_eq!(
            info("https", "acme.example.com", "8443").resolve_application_url(),
            "https://acme.example.com:8443"
        );
        // "443" is not special-cased; only the literal "80" is.
        assert_eq!(
            info("https", "acme.example.com", "443").resolve_application_url(),
            "https://acme.example.com:443"
        );
    }

    #[test]
    fn url_includes_empty_port_segment() {
        // Literal string compare against "80": empty is "not 80".
        assert_eq!(
            info("http", "acme.example.com", "").resolve_application_url(),
            "http://acme.example.com:"
        );
    }

    #[test]
    fn webapp_wins_verbatim() {
        let tenant = TenantInfo::builder("acme")
            .protocol("http")
            .domain("ignored.example.com")
            .port("9999")
            .webapp("https://portal.acme.com/app")
            .build();
        assert_eq!(
            tenant.resolve_application_url(),
            "https://portal.acme.com/app"
        );
    }

    #[test]
    fn blank_webapp_falls_back_to_host() {
        let tenant = TenantInfo::builder("acme")
            .protocol("http")
            .domain("acme.example.com")
            .port("80")
            .webapp("   ")
            .build();
        assert_eq!(tenant.resolve_application_url(), "http://acme.example.com");
    }

    #[test]
    fn context_read_before_bind_fails() {
        let ctx = TenantContext::new();
        assert_eq!(ctx.current(), Err(WardenError::NoTenantResolved));
        assert!(!ctx.is_bound());
    }

    #[test]
    fn context_bind_read_clear() {
        let ctx = TenantContext::new();
        ctx.bind(info("http", "acme.example.com", "80"));

        let current = ctx.current().unwrap();
        assert_eq!(current.tenant_id, "acme");
        assert_eq!(current.user_login, "jdoe");

        ctx.clear();
        assert_eq!(ctx.current(), Err(WardenError::NoTenantResolved));
    }
}
