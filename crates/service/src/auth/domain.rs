use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const USER_ID_KEY: &str = "userId";
pub const ROLE_KEY: &str = "role";
pub const API_ID_KEY: &str = "apiId";
pub const ACCOUNT_ID_KEY: &str = "accountId";

/// Caller role. Closed set; unrecognised values are treated as `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(self) -> bool { self == Role::Admin }

    /// Lenient parse for values crossing a trust boundary (claims, resolver context).
    pub fn from_claim(value: Option<&str>) -> Role {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::User,
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self { Role::from_claim(Some(value)) }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// What the authorizer gets to see of an inbound request.
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    pub authorization_token: Option<String>,
    pub api_id: Option<String>,
    pub account_id: Option<String>,
}

impl AuthRequest {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { authorization_token: Some(token.into()), ..Default::default() }
    }
}

/// Authorizer verdict, serialized in the shape the GraphQL gateway expects.
///
/// `ttl_override` tells the gateway how long it may reuse the decision; the authorizer
/// itself never caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDecision {
    pub is_authorized: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub resolver_context: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_override: Option<u64>,
}

impl AuthDecision {
    pub fn deny() -> Self {
        Self { is_authorized: false, resolver_context: HashMap::new(), ttl_override: None }
    }

    pub fn allow(resolver_context: HashMap<String, String>, ttl_seconds: u64) -> Self {
        Self { is_authorized: true, resolver_context, ttl_override: Some(ttl_seconds) }
    }

    /// Role carried in the resolver context; `User` when absent or unrecognised.
    pub fn role(&self) -> Role {
        Role::from_claim(self.resolver_context.get(ROLE_KEY).map(String::as_str))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.resolver_context.get(USER_ID_KEY).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_default_to_user() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from(" ADMIN "), Role::Admin);
        assert_eq!(Role::from("superuser"), Role::User);
        assert_eq!(Role::from_claim(None), Role::User);
    }

    #[test]
    fn deny_serializes_to_bare_flag() {
        let json = serde_json::to_value(AuthDecision::deny()).unwrap();
        assert_eq!(json, serde_json::json!({ "isAuthorized": false }));
    }

    #[test]
    fn allow_serializes_gateway_fields() {
        let ctx = HashMap::from([(ROLE_KEY.to_string(), "admin".to_string())]);
        let json = serde_json::to_value(AuthDecision::allow(ctx, 300)).unwrap();
        assert_eq!(json["isAuthorized"], true);
        assert_eq!(json["ttlOverride"], 300);
        assert_eq!(json["resolverContext"]["role"], "admin");
    }
}
