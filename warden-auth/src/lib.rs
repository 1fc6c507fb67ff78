//! warden-auth: identity and authorization components for Warden.
//!
//! Built on `warden-core`'s tenant context and handler registry:
//! resource lookup and password-reset handling dispatch to pluggable,
//! runtime-selected handlers; OAuth2 code-grant flows use the
//! single-use [`AuthorizationCodeStore`]; token introspection uses the
//! claim verifier.

pub mod claims;
pub mod code;
pub mod resource;
pub mod reset;

pub use claims::verify_audience;
pub use code::{AuthorizationCodeStore, CodeFlowHook, CodeFlowOp};
pub use resource::{ResourceDispatcher, ResourceRepository};
pub use reset::{
    DefaultResetHandler, EmailResetHandler, PasswordMailer, ResetDispatcher, ResetHandler,
    ResetRequest, EMAIL_RESET_TYPE,
};
