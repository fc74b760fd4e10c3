use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use configs::{AuthConfig, BearerPolicy};
use tracing::{error, info, instrument, warn};

use super::domain::{AuthDecision, AuthRequest, Role, ACCOUNT_ID_KEY, API_ID_KEY, ROLE_KEY, USER_ID_KEY};
use super::verifier::{ChainVerifier, CredentialVerifier, JwtVerifier, StaticTokenVerifier};

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct AuthorizerConfig {
    pub bearer_policy: BearerPolicy,
    pub ttl_seconds: u64,
    /// Placeholder identity reported for authorized callers.
    pub user_id: String,
    /// Convert panics inside credential handling into a deny.
    pub catch_faults: bool,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        AuthorizerConfig::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for AuthorizerConfig {
    fn from(cfg: &AuthConfig) -> Self {
        Self {
            bearer_policy: cfg.bearer_prefix,
            ttl_seconds: cfg.ttl_seconds,
            user_id: cfg.user_id.clone(),
            catch_faults: cfg.catch_faults,
        }
    }
}

/// Stateless request authorizer: extract → unwrap scheme → classify → decide.
///
/// Always returns a decision; it never reports an error to its caller.
pub struct Authorizer {
    verifier: Arc<dyn CredentialVerifier>,
    cfg: AuthorizerConfig,
}

impl Authorizer {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, cfg: AuthorizerConfig) -> Self {
        Self { verifier, cfg }
    }

    /// Static user/admin tokens, plus HS256 JWTs when a secret is configured.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let mut chain = ChainVerifier::default();
        chain.push(StaticTokenVerifier::new(&auth.user_token, &auth.admin_token));
        if let Some(secret) = &auth.jwt_secret {
            chain.push(JwtVerifier::hs256(secret));
        }
        Self::new(Arc::new(chain), AuthorizerConfig::from(auth))
    }

    pub fn ttl_seconds(&self) -> u64 { self.cfg.ttl_seconds }

    #[instrument(skip_all, fields(api_id = request.api_id.as_deref().unwrap_or(UNKNOWN)))]
    pub fn authorize(&self, request: &AuthRequest) -> AuthDecision {
        info!("processing authorization request");
        let Some(token) = request.authorization_token.as_deref().filter(|t| !t.trim().is_empty()) else {
            warn!("missing authorization token");
            return AuthDecision::deny();
        };

        let role = if self.cfg.catch_faults {
            panic::catch_unwind(AssertUnwindSafe(|| self.classify(token))).unwrap_or_else(|_| {
                error!("authorization fault, denying request");
                None
            })
        } else {
            self.classify(token)
        };

        match role {
            Some(role) => {
                info!(%role, "authorization granted");
                AuthDecision::allow(self.resolver_context(role, request), self.cfg.ttl_seconds)
            }
            None => {
                info!("authorization denied");
                AuthDecision::deny()
            }
        }
    }

    fn classify(&self, token: &str) -> Option<Role> {
        let credential = unwrap_scheme(self.cfg.bearer_policy, token.trim())?;
        if credential.is_empty() {
            return None;
        }
        self.verifier.verify(credential)
    }

    fn resolver_context(&self, role: Role, request: &AuthRequest) -> HashMap<String, String> {
        HashMap::from([
            (USER_ID_KEY.to_string(), self.cfg.user_id.clone()),
            (ROLE_KEY.to_string(), role.as_str().to_string()),
            (API_ID_KEY.to_string(), request.api_id.clone().unwrap_or_else(|| UNKNOWN.into())),
            (ACCOUNT_ID_KEY.to_string(), request.account_id.clone().unwrap_or_else(|| UNKNOWN.into())),
        ])
    }
}

/// Apply the bearer policy. `None` means the credential does not conform and is denied.
pub fn unwrap_scheme(policy: BearerPolicy, token: &str) -> Option<&str> {
    let stripped = strip_bearer(token);
    match policy {
        BearerPolicy::None => Some(token),
        BearerPolicy::Optional => Some(stripped.unwrap_or(token)),
        BearerPolicy::Required => stripped,
    }
}

fn strip_bearer(token: &str) -> Option<&str> {
    const SCHEME: &str = "bearer ";
    let head = token.get(..SCHEME.len())?;
    head.eq_ignore_ascii_case(SCHEME).then(|| token[SCHEME.len()..].trim_start())
}
