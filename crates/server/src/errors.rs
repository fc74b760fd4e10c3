use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use service::errors::ServiceError;

use crate::observability::OPERATION_ERRORS_TOTAL;

/// GraphQL error code reported in `extensions.code`.
pub fn error_code(err: &ServiceError) -> &'static str {
    match err {
        ServiceError::Validation(_) => "BAD_USER_INPUT",
        ServiceError::NotFound(_) => "NOT_FOUND",
        ServiceError::Forbidden(_) => "FORBIDDEN",
        ServiceError::Store(_) => "INTERNAL",
    }
}

/// Convert a service failure into a resolver error. Store details stay in the log.
pub fn gql_error(err: ServiceError) -> async_graphql::Error {
    OPERATION_ERRORS_TOTAL.with_label_values(&[err.kind()]).inc();
    let message = match &err {
        ServiceError::Store(detail) => {
            error!(error = %detail, "store failure");
            "internal error".to_string()
        }
        other => other.to_string(),
    };
    let code = error_code(&err);
    let kind = err.kind();
    async_graphql::Error::new(message).extend_with(|_, e| {
        e.set("code", code);
        e.set("errorType", kind);
    })
}

/// Errors answered outside GraphQL execution.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        };
        warn!(status = status.as_u16(), "request rejected");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
