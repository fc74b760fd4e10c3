//! AppSync direct Lambda resolver functions for the to-do API.
//!
//! Each deployed function handles exactly one GraphQL field; the binaries under `bins/`
//! pick one handler from [`handlers::TodoFunctions`] or the [`authorizer::AuthorizerFunction`].

pub mod appsync;
pub mod authorizer;
pub mod bootstrap;
pub mod errors;
pub mod handlers;

pub use authorizer::AuthorizerFunction;
pub use handlers::TodoFunctions;
