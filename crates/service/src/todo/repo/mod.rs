//! Concrete `TodoRepository` implementations and backend selection.

use std::sync::Arc;

use configs::{StoreBackend, StoreConfig};
use tracing::info;

use crate::errors::ServiceError;
use crate::todo::repository::TodoRepository;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod json_file;

/// Build the repository selected by `store.backend`.
pub async fn build_repository(cfg: &StoreConfig) -> Result<Arc<dyn TodoRepository>, ServiceError> {
    match cfg.backend {
        StoreBackend::File => {
            info!(path = %cfg.file_path, "using json file store");
            let repo = json_file::JsonFileTodoRepository::open(&cfg.file_path).await?;
            Ok(Arc::new(repo))
        }
        #[cfg(feature = "dynamodb")]
        StoreBackend::Dynamodb => {
            info!(table = %cfg.table_name, "using dynamodb store");
            let repo = dynamodb::DynamoDbTodoRepository::from_env(&cfg.table_name).await;
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "dynamodb"))]
        StoreBackend::Dynamodb => Err(ServiceError::Store(
            "dynamodb backend requested but the `dynamodb` feature is disabled".into(),
        )),
    }
}
