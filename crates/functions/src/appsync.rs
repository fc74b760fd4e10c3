//! The parts of the AppSync Lambda payloads these functions read.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use service::auth::AuthRequest;

/// Direct Lambda resolver invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSyncResolverEvent<A> {
    pub arguments: A,
    #[serde(default)]
    pub identity: Option<AppSyncIdentity>,
    #[serde(default)]
    pub info: Option<AppSyncInfo>,
}

impl<A> AppSyncResolverEvent<A> {
    pub fn new(arguments: A) -> Self {
        Self { arguments, identity: None, info: None }
    }

    pub fn with_identity(mut self, identity: AppSyncIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn field_name(&self) -> Option<&str> {
        self.info.as_ref()?.field_name.as_deref()
    }
}

/// Caller identity. User-pool/OIDC callers carry `claims`; Lambda-authorized callers carry
/// the authorizer's `resolverContext`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSyncIdentity {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub claims: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub resolver_context: Option<HashMap<String, String>>,
}

impl AppSyncIdentity {
    pub fn claim_role(&self) -> Option<&str> {
        self.claims.as_ref()?.get("role")?.as_str()
    }

    pub fn context_role(&self) -> Option<&str> {
        self.resolver_context.as_ref()?.get("role").map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSyncInfo {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub parent_type_name: Option<String>,
}

/// `listTodos` takes no arguments; AppSync sends `{}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoArguments {}

#[derive(Debug, Clone, Deserialize)]
pub struct IdArguments {
    pub id: String,
}

/// Lambda authorizer invocation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSyncAuthorizerEvent {
    #[serde(default)]
    pub authorization_token: Option<String>,
    #[serde(default)]
    pub request_context: Option<AuthorizerRequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequestContext {
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl AppSyncAuthorizerEvent {
    pub fn to_auth_request(&self) -> AuthRequest {
        let ctx = self.request_context.as_ref();
        AuthRequest {
            authorization_token: self.authorization_token.clone(),
            api_id: ctx.and_then(|c| c.api_id.clone()),
            account_id: ctx.and_then(|c| c.account_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_resolver_event_with_claims() {
        let raw = json!({
            "arguments": { "id": "42" },
            "identity": { "sub": "abc", "claims": { "role": "admin", "cognito:groups": ["ops"] } },
            "info": { "fieldName": "deleteTodo", "parentTypeName": "Mutation" },
            "source": null,
            "request": { "headers": {} }
        });
        let event: AppSyncResolverEvent<IdArguments> = serde_json::from_value(raw).unwrap();
        assert_eq!(event.arguments.id, "42");
        assert_eq!(event.field_name(), Some("deleteTodo"));
        assert_eq!(event.info.as_ref().and_then(|i| i.parent_type_name.as_deref()), Some("Mutation"));
        assert_eq!(event.identity.unwrap().claim_role(), Some("admin"));
    }

    #[test]
    fn reads_authorizer_event() {
        let raw = json!({
            "authorizationToken": "valid-token",
            "requestContext": { "apiId": "api", "accountId": "111122223333", "requestId": "r", "operationName": "ListTodos", "queryString": "{ listTodos { id } }" }
        });
        let event: AppSyncAuthorizerEvent = serde_json::from_value(raw).unwrap();
        let ctx = event.request_context.as_ref().unwrap();
        assert_eq!(ctx.operation_name.as_deref(), Some("ListTodos"));
        assert_eq!(ctx.request_id.as_deref(), Some("r"));
        let req = event.to_auth_request();
        assert_eq!(req.authorization_token.as_deref(), Some("valid-token"));
        assert_eq!(req.account_id.as_deref(), Some("111122223333"));
    }
}
