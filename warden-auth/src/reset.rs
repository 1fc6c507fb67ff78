//! Password-reset handler dispatch.
//!
//! The reset type is extracted from the request payload, uppercased,
//! and resolved against the handler registry. Any non-null key that is
//! not registered falls back to the designated default handler, which
//! logs and no-ops: an unrecognized reset type must never block the
//! encompassing flow. Only a missing key is rejected.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use warden_core::{HandlerRegistry, TenantContext, WardenResult};

/// Reset type handled by [`EmailResetHandler`].
pub const EMAIL_RESET_TYPE: &str = "EMAIL";

/// A password-reset request as extracted from the inbound payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ResetRequest {
    /// Reset type tag from the payload; `None` when the payload did
    /// not carry one.
    pub reset_type: Option<String>,
    /// The user the reset applies to.
    pub user: Value,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ResetRequest {
    pub fn new(reset_type: impl Into<String>, user: Value) -> Self {
        Self {
            reset_type: Some(reset_type.into()),
            user,
            data: Map::new(),
        }
    }
}

/// A handler for one reset type.
#[async_trait]
pub trait ResetHandler: Send + Sync {
    async fn handle(&self, ctx: &TenantContext, request: &ResetRequest) -> WardenResult<()>;
}

/// External mail-sending collaborator.
#[async_trait]
pub trait PasswordMailer: Send + Sync {
    async fn send_password_init_mail(&self, user: &Value) -> WardenResult<()>;
}

/// Built-in handler for the `"EMAIL"` reset type: sends the user a
/// password-init mail through the external mailer.
pub struct EmailResetHandler {
    mailer: Arc<dyn PasswordMailer>,
}

impl EmailResetHandler {
    pub fn new(mailer: Arc<dyn PasswordMailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl ResetHandler for EmailResetHandler {
    async fn handle(&self, _ctx: &TenantContext, request: &ResetRequest) -> WardenResult<()> {
        self.mailer.send_password_init_mail(&request.user).await
    }
}

/// Fallback for reset types with no registered handler. Logs and
/// no-ops so the encompassing flow continues.
#[derive(Debug, Default)]
pub struct DefaultResetHandler;

#[async_trait]
impl ResetHandler for DefaultResetHandler {
    async fn handle(&self, _ctx: &TenantContext, request: &ResetRequest) -> WardenResult<()> {
        tracing::warn!(
            reset_type = request.reset_type.as_deref().unwrap_or_default(),
            "no reset handler registered for reset type, ignoring request"
        );
        Ok(())
    }
}

/// Routes reset requests to the handler for their reset type.
pub struct ResetDispatcher {
    handlers: HandlerRegistry<dyn ResetHandler>,
    default: Arc<dyn ResetHandler>,
}

impl ResetDispatcher {
    /// Create a dispatcher with the designated default handler.
    pub fn new(default: Arc<dyn ResetHandler>) -> Self {
        Self {
            handlers: HandlerRegistry::new(),
            default,
        }
    }

    /// Create the standard dispatcher: `"EMAIL"` routed to
    /// [`EmailResetHandler`], everything else to
    /// [`DefaultResetHandler`].
    pub fn standard(mailer: Arc<dyn PasswordMailer>) -> Self {
        let mut dispatcher = Self::new(Arc::new(DefaultResetHandler));
        dispatcher.register(EMAIL_RESET_TYPE, Arc::new(EmailResetHandler::new(mailer)));
        dispatcher
    }

    /// Register a handler for a reset type. The key is uppercased, as
    /// it will be again on lookup.
    pub fn register(&mut self, reset_type: impl AsRef<str>, handler: Arc<dyn ResetHandler>) {
        self.handlers.register(reset_type, handler);
    }

    /// The handler for `reset_type`, or the default when the type is
    /// not registered. A missing type fails with
    /// [`warden_core::WardenError::InvalidArgument`].
    pub fn resolve(&self, reset_type: Option<&str>) -> WardenResult<Arc<dyn ResetHandler>> {
        match self.handlers.resolve(reset_type)? {
            Some(handler) => Ok(handler),
            None => Ok(self.default.clone()),
        }
    }

    /// Resolve the request's reset type and run the handler.
    pub async fn dispatch(&self, ctx: &TenantContext, request: &ResetRequest) -> WardenResult<()> {
        let handler = self.resolve(request.reset_type.as_deref())?;
        handler.handle(ctx, request).await
    }
}
