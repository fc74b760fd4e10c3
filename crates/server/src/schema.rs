use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema, ID};

use models::{CreateTodoItem, Todo, UpdateTodoItem};
use service::auth::gate::require_admin;
use service::auth::Role;
use service::todo::DynTodoService;

use crate::auth::RequestAuth;
use crate::errors::gql_error;

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: Arc<DynTodoService>) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).data(service).finish()
}

fn todos<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<DynTodoService>> {
    ctx.data::<Arc<DynTodoService>>()
}

/// Role admitted by the authorizer for this request. Requests without a decision are users.
fn caller_role(ctx: &Context<'_>) -> Role {
    ctx.data_opt::<RequestAuth>().map(RequestAuth::role).unwrap_or_default()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn list_todos(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Todo>> {
        todos(ctx)?.list_all().await.map_err(gql_error)
    }

    /// `null` when no item has this id.
    async fn get_todo_by_id(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Todo>> {
        match todos(ctx)?.get_by_id(&id).await {
            Ok(todo) => Ok(Some(todo)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(gql_error(e)),
        }
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_todo(&self, ctx: &Context<'_>, title: String, description: String) -> async_graphql::Result<Todo> {
        todos(ctx)?.create(CreateTodoItem { title, description }).await.map_err(gql_error)
    }

    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
        description: String,
        completed: bool,
    ) -> async_graphql::Result<Todo> {
        let input = UpdateTodoItem { id: id.to_string(), title, description, completed };
        todos(ctx)?.update(input).await.map_err(gql_error)
    }

    /// Admin only.
    async fn delete_todo(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Todo> {
        require_admin(caller_role(ctx)).map_err(gql_error)?;
        todos(ctx)?.delete(&id).await.map_err(gql_error)
    }
}
