use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::{env, utils::logging::init_logging_default};
use configs::{AppConfig, ServerConfig};
use service::auth::Authorizer;
use service::todo::repo::build_repository;
use service::todo::TodoService;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

/// Wire repository, service, authorizer and schema from configuration.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let repo = build_repository(&cfg.store).await?;
    let service = Arc::new(TodoService::new(repo));
    let state = AppState::new(service, Authorizer::from_config(&cfg.auth));
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until ctrl-c.
pub async fn run() -> anyhow::Result<()> {
    env::load_dotenv();
    init_logging_default();

    let cfg = AppConfig::load_and_validate()?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, backend = ?cfg.store.backend, bearer = ?cfg.auth.bearer_prefix, "starting todo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
