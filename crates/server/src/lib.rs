//! Local GraphQL host for the to-do API.
//!
//! Serves the same five operations the deployed functions resolve, behind the same
//! authorizer, so the whole API can be exercised without the managed gateway.

pub mod auth;
pub mod errors;
pub mod observability;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod state;

pub use startup::run;
