use serde_json::Value;
use tracing::{info, warn};

use service::auth::{AuthDecision, Authorizer};

use crate::appsync::AppSyncAuthorizerEvent;

/// Lambda authorizer entry. Every input, malformed payloads included, yields a decision.
pub struct AuthorizerFunction {
    authorizer: Authorizer,
}

impl AuthorizerFunction {
    pub fn new(authorizer: Authorizer) -> Self { Self { authorizer } }

    pub fn handle(&self, event: &AppSyncAuthorizerEvent) -> AuthDecision {
        let ctx = event.request_context.as_ref();
        info!(
            request_id = ctx.and_then(|c| c.request_id.as_deref()).unwrap_or("-"),
            operation = ctx.and_then(|c| c.operation_name.as_deref()).unwrap_or("-"),
            "authorizer_invoked"
        );
        self.authorizer.authorize(&event.to_auth_request())
    }

    /// Accepts the raw payload so a shape mismatch becomes a deny instead of a runtime error.
    pub fn handle_raw(&self, payload: Value) -> AuthDecision {
        match serde_json::from_value::<AppSyncAuthorizerEvent>(payload) {
            Ok(event) => self.handle(&event),
            Err(e) => {
                warn!(err = %e, "unreadable authorizer event");
                AuthDecision::deny()
            }
        }
    }
}
