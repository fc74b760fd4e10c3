use functions::appsync::{AppSyncResolverEvent, NoArguments};
use functions::errors::diagnostic;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

/// `listTodos` resolver.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = functions::bootstrap::resolver("listTodos").await?;
    let handlers = &handlers;

    run(service_fn(move |event: LambdaEvent<AppSyncResolverEvent<NoArguments>>| async move {
        handlers.list_todos(event.payload).await.map_err(diagnostic)
    }))
    .await
}
