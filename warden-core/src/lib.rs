//! warden-core: framework-agnostic multi-tenancy core for Warden.
//!
//! Everything in this crate is transport-agnostic: tenant identity is
//! carried in an explicit [`TenantContext`] threaded through call
//! chains, persistence routing is a pure template lookup, and caches
//! live exactly as long as the request that created them.

pub mod cache;
pub mod dispatch;
pub mod errors;
pub mod options;
pub mod schema;
pub mod scope;
pub mod tenant;

pub use cache::{RequestCache, RequestScopedCacheManager};
pub use dispatch::HandlerRegistry;
pub use errors::{WardenError, WardenResult};
pub use options::{CodeOptions, DatabaseOptions, WardenOptions};
pub use schema::SchemaChangeResolver;
pub use scope::RequestScope;
pub use tenant::{TenantContext, TenantInfo, TenantInfoBuilder};
