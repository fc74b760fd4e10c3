use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram, IntCounter,
    IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static GRAPHQL_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("todo_graphql_requests_total", "Total GraphQL requests executed")
        .expect("register graphql_requests_total")
});

pub static GRAPHQL_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "todo_graphql_duration_seconds",
        "GraphQL execution time in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register graphql_duration")
});

pub static AUTH_DENIED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("todo_auth_denied_total", "Total requests rejected by the authorizer")
        .expect("register auth_denied_total")
});

pub static AUTH_CACHE_HITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("todo_auth_cache_hits_total", "Authorization decisions served from cache")
        .expect("register auth_cache_hits_total")
});

pub static OPERATION_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!("todo_operation_errors_total", "Resolver errors by kind", &["kind"])
        .expect("register operation_errors_total")
});

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
