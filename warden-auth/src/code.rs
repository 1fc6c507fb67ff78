//! Authorization code store.
//!
//! Codes move `Issued -> Consumed` or `Issued -> Expired`, both
//! terminal. Consumption is a destructive one-time read: the map's
//! atomic remove-and-return guarantees that of any number of
//! concurrent consumers of the same code, exactly one succeeds and the
//! rest observe [`WardenError::UnknownOrExpiredCode`].
//!
//! Each operation is wrapped by named extension points (the
//! [`CodeFlowHook`] before/after stages) so pre-validation and
//! auditing can be plugged in without touching the core guarantee.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use warden_core::{CodeOptions, TenantContext, WardenError, WardenResult};

/// Which store operation a hook is wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFlowOp {
    Create,
    Consume,
}

impl CodeFlowOp {
    /// Extension point name for this operation.
    pub fn name(&self) -> &'static str {
        match self {
            CodeFlowOp::Create => "authorization-code.create",
            CodeFlowOp::Consume => "authorization-code.consume",
        }
    }
}

/// Extension point invoked around each store operation.
///
/// A failing `before` aborts the operation; `after` observes the
/// outcome and its own failures are ignored (auditing must not break
/// redemption).
#[async_trait]
pub trait CodeFlowHook: Send + Sync {
    async fn before(&self, _op: CodeFlowOp, _ctx: &TenantContext) -> WardenResult<()> {
        Ok(())
    }

    async fn after(
        &self,
        _op: CodeFlowOp,
        _ctx: &TenantContext,
        _succeeded: bool,
    ) -> WardenResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct IssuedCode {
    authentication: Value,
    issued_at: DateTime<Utc>,
}

/// Process-wide store of short-lived, single-use authorization codes.
pub struct AuthorizationCodeStore {
    codes: DashMap<String, IssuedCode>,
    ttl: TimeDelta,
    hooks: Vec<Arc<dyn CodeFlowHook>>,
}

impl AuthorizationCodeStore {
    pub fn new(options: CodeOptions) -> Self {
        Self {
            codes: DashMap::new(),
            ttl: TimeDelta::from_std(options.code_ttl).unwrap_or(TimeDelta::MAX),
            hooks: Vec::new(),
        }
    }

    /// Attach an extension hook. Hooks run in attachment order.
    pub fn with_hook(mut self, hook: Arc<dyn CodeFlowHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Issue a fresh code bound to `authentication` and return it.
    ///
    /// The code is a 128-bit random identifier; the vacancy check on
    /// insert keeps it from clashing with any currently-issued,
    /// unconsumed code.
    pub async fn create_authorization_code(
        &self,
        ctx: &TenantContext,
        authentication: Value,
    ) -> WardenResult<String> {
        for hook in &self.hooks {
            hook.before(CodeFlowOp::Create, ctx).await?;
        }

        let code = loop {
            let candidate = Uuid::new_v4().simple().to_string();
            match self.codes.entry(candidate.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(IssuedCode {
                        authentication,
                        issued_at: Utc::now(),
                    });
                    break candidate;
                }
            }
        };

        tracing::debug!(code_prefix = &code[..8], "issued authorization code");

        for hook in &self.hooks {
            let _ = hook.after(CodeFlowOp::Create, ctx, true).await;
        }

        Ok(code)
    }

    /// Atomically remove `code` and return its authentication.
    ///
    /// Fails with [`WardenError::UnknownOrExpiredCode`] when the code
    /// was never issued, already consumed, or expired. Never silently
    /// swallowed: the caller surfaces this as an invalid grant.
    pub async fn consume_authorization_code(
        &self,
        ctx: &TenantContext,
        code: &str,
    ) -> WardenResult<Value> {
        for hook in &self.hooks {
            hook.before(CodeFlowOp::Consume, ctx).await?;
        }

        let result = match self.codes.remove(code) {
            Some((_, issued)) if Utc::now() - issued.issued_at <= self.ttl => {
                Ok(issued.authentication)
            }
            Some(_) => {
                tracing::debug!("authorization code expired before consumption");
                Err(WardenError::UnknownOrExpiredCode)
            }
            None => Err(WardenError::UnknownOrExpiredCode),
        };

        for hook in &self.hooks {
            let _ = hook.after(CodeFlowOp::Consume, ctx, result.is_ok()).await;
        }

        result
    }

    /// Number of currently issued, unconsumed codes (expired entries
    /// included until their lazy removal at consumption).
    pub fn issued_count(&self) -> usize {
        self.codes.len()
    }
}

impl Default for AuthorizationCodeStore {
    fn default() -> Self {
        Self::new(CodeOptions::default())
    }
}
