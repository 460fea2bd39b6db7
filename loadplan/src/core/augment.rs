//! Decides which auxiliary nodes a target request needs.
//!
//! Anti-forgery tokens are issued on the login response and must be echoed on
//! every state-mutating request. Read-only requests never carry the token.

use crate::core::method::HttpMethod;

/// Outcome of [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentationPlan {
    /// Target request is sent as-is.
    None,
    /// Extract the token on login and inject it on the target request.
    ThreadToken {
        /// Send the body verbatim and add a `Content-Type` header to the injector.
        raw_body: bool,
    },
}

impl AugmentationPlan {
    pub fn needs_token(self) -> bool {
        matches!(self, AugmentationPlan::ThreadToken { .. })
    }

    pub fn attaches_body(self) -> bool {
        matches!(self, AugmentationPlan::ThreadToken { raw_body: true })
    }
}

/// Body attachment rides on the injector node, so it only happens for
/// mutating methods; a body on any other method is ignored.
pub fn decide(method: HttpMethod, body: Option<&str>) -> AugmentationPlan {
    if !method.is_mutating() {
        return AugmentationPlan::None;
    }
    AugmentationPlan::ThreadToken {
        raw_body: body.is_some_and(|body| !body.is_empty()),
    }
}
