use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use service::auth::{AuthDecision, AuthRequest, Authorizer};
use service::todo::DynTodoService;

use crate::observability::AUTH_CACHE_HITS_TOTAL;
use crate::schema::{build_schema, TodoSchema};

/// Reported as `apiId` in the resolver context of locally served requests.
pub const LOCAL_API_ID: &str = "local";

#[derive(Clone)]
pub struct AppState {
    pub schema: TodoSchema,
    authorizer: Arc<Authorizer>,
    /// Allowed decisions keyed by the raw `Authorization` header, kept for their TTL.
    decisions: Cache<String, AuthDecision>,
}

impl AppState {
    pub fn new(service: Arc<DynTodoService>, authorizer: Authorizer) -> Self {
        let decisions = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(authorizer.ttl_seconds()))
            .build();
        Self { schema: build_schema(service), authorizer: Arc::new(authorizer), decisions }
    }

    /// Decision for the presented header, reusing a cached allow when one is live.
    /// Denials are never cached.
    pub async fn authorize(&self, header: Option<&str>) -> AuthDecision {
        if let Some(key) = header {
            if let Some(hit) = self.decisions.get(key).await {
                AUTH_CACHE_HITS_TOTAL.inc();
                debug!("authorization served from cache");
                return hit;
            }
        }

        let request = AuthRequest {
            authorization_token: header.map(str::to_string),
            api_id: Some(LOCAL_API_ID.to_string()),
            account_id: None,
        };
        let decision = self.authorizer.authorize(&request);
        if let (true, Some(key)) = (decision.is_authorized, header) {
            self.decisions.insert(key.to_string(), decision.clone()).await;
        }
        decision
    }
}
