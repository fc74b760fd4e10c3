use std::collections::HashMap;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use super::domain::Role;

/// Maps a presented credential (scheme marker already removed) to a role.
///
/// Implementations must be cheap and side-effect free; the authorizer may call them for
/// every request.
pub trait CredentialVerifier: Send + Sync {
    /// Role for a recognised credential, `None` for anything else.
    fn verify(&self, credential: &str) -> Option<Role>;
}

/// Fixed credential table. Placeholder scheme for demos and local development.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    table: HashMap<String, Role>,
}

impl StaticTokenVerifier {
    pub fn new(user_token: &str, admin_token: &str) -> Self {
        Self::from_pairs([(user_token.to_string(), Role::User), (admin_token.to_string(), Role::Admin)])
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Role)>) -> Self {
        Self { table: pairs.into_iter().collect() }
    }
}

impl CredentialVerifier for StaticTokenVerifier {
    fn verify(&self, credential: &str) -> Option<Role> {
        self.table.get(credential).copied()
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    role: Option<String>,
}

/// HS256 JWTs with `sub` and `exp`; the optional `role` claim selects the role.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn hs256(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self { key: DecodingKey::from_secret(secret.as_bytes()), validation }
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, credential: &str) -> Option<Role> {
        match decode::<Claims>(credential, &self.key, &self.validation) {
            Ok(data) => Some(Role::from_claim(data.claims.role.as_deref())),
            Err(e) => {
                debug!(err = %e, "jwt rejected");
                None
            }
        }
    }
}

/// Tries each verifier in order; the first that recognises the credential wins.
#[derive(Default)]
pub struct ChainVerifier {
    verifiers: Vec<Box<dyn CredentialVerifier>>,
}

impl ChainVerifier {
    pub fn push(&mut self, verifier: impl CredentialVerifier + 'static) {
        self.verifiers.push(Box::new(verifier));
    }
}

impl CredentialVerifier for ChainVerifier {
    fn verify(&self, credential: &str) -> Option<Role> {
        self.verifiers.iter().find_map(|v| v.verify(credential))
    }
}
