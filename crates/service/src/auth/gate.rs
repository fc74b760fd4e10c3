use tracing::warn;

use super::domain::Role;
use crate::errors::ServiceError;

/// Caller role from the request identity. A structured `role` claim takes precedence over
/// the authorizer's resolver context; neither present means `User`.
pub fn resolve_role(claim_role: Option<&str>, context_role: Option<&str>) -> Role {
    let non_blank = |v: &&str| !v.trim().is_empty();
    Role::from_claim(claim_role.filter(non_blank).or(context_role.filter(non_blank)))
}

/// Admin-only operations call this before touching the store, so a rejected caller learns
/// nothing about whether the target exists.
pub fn require_admin(role: Role) -> Result<(), ServiceError> {
    if role.is_admin() {
        return Ok(());
    }
    warn!(%role, "admin role required");
    Err(ServiceError::Forbidden("only admins can delete todos".into()))
}
