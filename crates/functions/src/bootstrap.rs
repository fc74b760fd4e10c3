//! Cold-start wiring shared by the function binaries.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use common::{env, utils::logging};
use configs::AppConfig;
use service::auth::Authorizer;
use service::todo::repo::build_repository;
use service::todo::TodoService;

use crate::{AuthorizerFunction, TodoFunctions};

fn init(function: &'static str) -> Result<AppConfig> {
    env::load_dotenv();
    logging::init_for_runtime();
    let cfg = AppConfig::load_and_validate()?;
    info!(
        service = "todo-functions",
        event = "init",
        function,
        lambda = env::lambda_function_name().as_deref().unwrap_or("-"),
        "function_init"
    );
    Ok(cfg)
}

/// Environment, logging, configuration and repository for a resolver function.
pub async fn resolver(function: &'static str) -> Result<TodoFunctions> {
    let cfg = init(function)?;
    let repo = build_repository(&cfg.store).await?;
    Ok(TodoFunctions::new(Arc::new(TodoService::new(repo))))
}

pub fn authorizer() -> Result<AuthorizerFunction> {
    let cfg = init("authorizer")?;
    Ok(AuthorizerFunction::new(Authorizer::from_config(&cfg.auth)))
}
