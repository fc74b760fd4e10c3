use std::time::Instant;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    middleware,
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{require_authorization, RequestAuth};
use crate::observability::{encode_metrics, GRAPHQL_DURATION, GRAPHQL_REQUESTS_TOTAL};
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", service: "todo-server" })
}

async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn graphql(
    State(state): State<AppState>,
    Extension(auth): Extension<RequestAuth>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    GRAPHQL_REQUESTS_TOTAL.inc();
    let started = Instant::now();
    let response = state.schema.execute(req.into_inner().data(auth)).await;
    GRAPHQL_DURATION.observe(started.elapsed().as_secs_f64());
    response.into()
}

/// Public routes (health, metrics, GraphiQL) plus the authorized GraphQL endpoint.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let guarded = post(graphql).route_layer(middleware::from_fn_with_state(state.clone(), require_authorization));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/graphql", get(graphiql).merge(guarded))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
