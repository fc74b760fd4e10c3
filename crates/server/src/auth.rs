use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use service::auth::{AuthDecision, Role};

use crate::errors::ApiError;
use crate::observability::AUTH_DENIED_TOTAL;
use crate::state::AppState;

/// Authorizer outcome attached to an admitted request.
#[derive(Debug, Clone)]
pub struct RequestAuth {
    pub decision: AuthDecision,
}

impl RequestAuth {
    pub fn role(&self) -> Role { self.decision.role() }
}

/// Runs the authorizer on every guarded request, as the managed gateway does before any
/// resolver. Denied requests get 401 and never reach GraphQL execution.
pub async fn require_authorization(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let decision = state.authorize(header.as_deref()).await;
    if !decision.is_authorized {
        AUTH_DENIED_TOTAL.inc();
        warn!(path = %req.uri().path(), "authorization denied");
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(RequestAuth { decision });
    Ok(next.run(req).await)
}
