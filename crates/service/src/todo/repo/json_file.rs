use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::TodoItem;

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;
use crate::todo::repository::TodoRepository;

/// Local development repository persisting items as a JSON object keyed by `Id`.
pub struct JsonFileTodoRepository {
    store: Arc<JsonMapStore<String, TodoItem>>,
}

impl JsonFileTodoRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::open(path).await? })
    }
}

#[async_trait]
impl TodoRepository for JsonFileTodoRepository {
    async fn scan_all(&self) -> Result<Vec<TodoItem>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TodoItem>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn put(&self, item: &TodoItem) -> Result<(), ServiceError> {
        self.store.insert(item.id.clone(), item.clone()).await
    }

    async fn delete(&self, item: &TodoItem) -> Result<(), ServiceError> {
        self.store.remove(&item.id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn items_survive_reopen() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("todos_{}.json", uuid::Uuid::new_v4()));
        let repo = JsonFileTodoRepository::open(&path).await?;
        let item = TodoItem::new("1", "Persist me", "", Utc::now());
        repo.put(&item).await?;

        let reopened = JsonFileTodoRepository::open(&path).await?;
        assert_eq!(reopened.get_by_id("1").await?, Some(item.clone()));

        reopened.delete(&item).await?;
        assert!(reopened.scan_all().await?.is_empty());

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
