use functions::appsync::AppSyncResolverEvent;
use functions::errors::diagnostic;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use models::CreateTodoItem;

/// `createTodo` resolver.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = functions::bootstrap::resolver("createTodo").await?;
    let handlers = &handlers;

    run(service_fn(move |event: LambdaEvent<AppSyncResolverEvent<CreateTodoItem>>| async move {
        handlers.create_todo(event.payload).await.map_err(diagnostic)
    }))
    .await
}
