use lambda_runtime::Diagnostic;
use tracing::error;

use service::errors::ServiceError;

/// Lambda error payload for a failed resolver. `errorType` carries the failure kind
/// (`NotFoundError`, `AuthorizationError`, `ValidationError`, `StoreError`); store details
/// stay in the log.
pub fn diagnostic(err: ServiceError) -> Diagnostic {
    let error_message = match &err {
        ServiceError::Store(detail) => {
            error!(error = %detail, "store failure");
            "internal error".to_string()
        }
        other => other.to_string(),
    };
    Diagnostic { error_type: err.kind().to_string(), error_message }
}
