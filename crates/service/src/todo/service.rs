use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::todo::validate_id;
use models::{CreateTodoItem, Todo, TodoItem, UpdateTodoItem};

use crate::errors::ServiceError;
use crate::todo::mapper;
use crate::todo::repository::TodoRepository;

/// Application service for to-do items, independent of transport.
///
/// The repository is injected; the service holds no other state, so one instance can be
/// shared across concurrent requests. Concurrent writes to the same id are last-write-wins.
pub struct TodoService<R: TodoRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as wired by the binaries.
pub type DynTodoService = TodoService<dyn TodoRepository>;

impl<R: TodoRepository + ?Sized> TodoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Todo>, ServiceError> {
        let items = self.repo.scan_all().await?;
        debug!(count = items.len(), "todos_listed");
        Ok(items.into_iter().map(mapper::into_dto).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Todo, ServiceError> {
        validate_id(id)?;
        let entity = self.repo.get_by_id(id).await?;
        mapper::to_dto(entity.as_ref()).ok_or_else(|| {
            debug!("todo_not_found");
            ServiceError::not_found("todo", id)
        })
    }

    /// Create a new, not yet completed item with a random 128-bit id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::CreateTodoItem;
    /// use service::todo::{TodoService, repository::mock::MockTodoRepository};
    /// let svc = TodoService::new(Arc::new(MockTodoRepository::default()));
    /// let input = CreateTodoItem { title: "Write docs".into(), description: "service crate".into() };
    /// let todo = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert!(!todo.completed);
    /// assert_eq!(todo.created_at, todo.updated_at);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateTodoItem) -> Result<Todo, ServiceError> {
        let entity = TodoItem::new(Uuid::new_v4().to_string(), input.title, input.description, Utc::now());
        self.repo.put(&entity).await?;
        info!(todo_id = %entity.id, "todo_created");
        Ok(mapper::into_dto(entity))
    }

    /// Replace title, description and completion of an existing item.
    /// A missing id is `NotFound` and nothing is written.
    #[instrument(skip(self, input), fields(todo_id = %input.id))]
    pub async fn update(&self, input: UpdateTodoItem) -> Result<Todo, ServiceError> {
        validate_id(&input.id)?;
        let Some(mut entity) = self.repo.get_by_id(&input.id).await? else {
            debug!("todo_not_found");
            return Err(ServiceError::not_found("todo", &input.id));
        };
        entity.apply(&input, Utc::now());
        self.repo.put(&entity).await?;
        info!(completed = entity.completed, "todo_updated");
        Ok(mapper::into_dto(entity))
    }

    /// Remove an item and return it as it was just before deletion.
    /// A missing id is `NotFound` and nothing is written.
    ///
    /// Callers on a request path must run `auth::gate::require_admin` first.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Todo, ServiceError> {
        validate_id(id)?;
        let Some(entity) = self.repo.get_by_id(id).await? else {
            debug!("todo_not_found");
            return Err(ServiceError::not_found("todo", id));
        };
        self.repo.delete(&entity).await?;
        info!("todo_deleted");
        Ok(mapper::into_dto(entity))
    }
}
