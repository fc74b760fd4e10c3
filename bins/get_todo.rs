use functions::appsync::{AppSyncResolverEvent, IdArguments};
use functions::errors::diagnostic;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

/// `getTodoById` resolver.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = functions::bootstrap::resolver("getTodoById").await?;
    let handlers = &handlers;

    run(service_fn(move |event: LambdaEvent<AppSyncResolverEvent<IdArguments>>| async move {
        handlers.get_todo_by_id(event.payload).await.map_err(diagnostic)
    }))
    .await
}
