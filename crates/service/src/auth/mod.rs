//! Authorization: credential verification, the per-request authorizer and the delete gate.
//!
//! The authorizer runs once per inbound request (in the gateway or the local server) and
//! produces an `AuthDecision`. Its resolver context travels with the request; resolvers
//! read the caller's `Role` from it and `gate::require_admin` guards destructive operations.

pub mod authorizer;
pub mod domain;
pub mod gate;
pub mod verifier;

pub use authorizer::{Authorizer, AuthorizerConfig};
pub use domain::{AuthDecision, AuthRequest, Role};
