use thiserror::Error;

/// Result type for Warden core operations.
pub type WardenResult<T> = Result<T, WardenError>;

/// Failure taxonomy for the tenancy and authorization core.
///
/// Resource dispatch for an unregistered type is deliberately NOT an
/// error: it returns `Ok(None)` so that lookups over an open set of
/// types stay non-fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WardenError {
    /// The tenant context was read before a tenant was bound to the
    /// request. Integration error, never user-visible.
    #[error("no tenant resolved for the current request")]
    NoTenantResolved,

    /// A dispatch key or argument was missing or invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Authorization code redemption failed: the code was never
    /// issued, already consumed, or expired. Surfaced to the OAuth2
    /// flow as an invalid-grant condition.
    #[error("authorization code is unknown, already consumed, or expired")]
    UnknownOrExpiredCode,

    /// A token claim did not match its expected value.
    #[error("invalid audience: expected '{expected}', found '{found}'")]
    InvalidAudience { expected: String, found: String },
}

impl WardenError {
    /// Create an `InvalidArgument` error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
