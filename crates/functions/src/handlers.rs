use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{CreateTodoItem, Todo, UpdateTodoItem};
use service::auth::gate::{require_admin, resolve_role};
use service::auth::Role;
use service::errors::ServiceError;
use service::todo::DynTodoService;

use crate::appsync::{AppSyncIdentity, AppSyncResolverEvent, IdArguments, NoArguments};

/// Resolver handlers, one per GraphQL field. Each binary wires exactly one of them.
#[derive(Clone)]
pub struct TodoFunctions {
    service: Arc<DynTodoService>,
}

impl TodoFunctions {
    pub fn new(service: Arc<DynTodoService>) -> Self { Self { service } }

    #[instrument(skip_all, fields(field = "listTodos"))]
    pub async fn list_todos(&self, event: AppSyncResolverEvent<NoArguments>) -> Result<Vec<Todo>, ServiceError> {
        log_event(&event);
        self.service.list_all().await
    }

    /// A missing id resolves to `null` rather than an error.
    #[instrument(skip_all, fields(field = "getTodoById", todo_id = %event.arguments.id))]
    pub async fn get_todo_by_id(&self, event: AppSyncResolverEvent<IdArguments>) -> Result<Option<Todo>, ServiceError> {
        log_event(&event);
        match self.service.get_by_id(&event.arguments.id).await {
            Ok(todo) => Ok(Some(todo)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip_all, fields(field = "createTodo"))]
    pub async fn create_todo(&self, event: AppSyncResolverEvent<CreateTodoItem>) -> Result<Todo, ServiceError> {
        log_event(&event);
        self.service.create(event.arguments).await
    }

    #[instrument(skip_all, fields(field = "updateTodo", todo_id = %event.arguments.id))]
    pub async fn update_todo(&self, event: AppSyncResolverEvent<UpdateTodoItem>) -> Result<Todo, ServiceError> {
        log_event(&event);
        self.service.update(event.arguments).await
    }

    /// Admin only. The role check happens before any store access.
    #[instrument(skip_all, fields(field = "deleteTodo", todo_id = %event.arguments.id))]
    pub async fn delete_todo(&self, event: AppSyncResolverEvent<IdArguments>) -> Result<Todo, ServiceError> {
        log_event(&event);
        require_admin(caller_role(event.identity.as_ref()))?;
        self.service.delete(&event.arguments.id).await
    }
}

/// Role of the invoking identity; anonymous callers are plain users.
pub fn caller_role(identity: Option<&AppSyncIdentity>) -> Role {
    identity
        .map(|i| resolve_role(i.claim_role(), i.context_role()))
        .unwrap_or_default()
}

fn log_event<A: Debug>(event: &AppSyncResolverEvent<A>) {
    let caller = event.identity.as_ref().and_then(|i| i.sub.as_deref()).unwrap_or("-");
    let parent_type = event.info.as_ref().and_then(|i| i.parent_type_name.as_deref()).unwrap_or("-");
    info!(caller, parent_type, field_name = event.field_name().unwrap_or("-"), "resolver_invoked");
    debug!(arguments = ?event.arguments, "resolver_arguments");
}
