use functions::appsync::{AppSyncResolverEvent, IdArguments};
use functions::errors::diagnostic;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

/// `deleteTodo` resolver.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = functions::bootstrap::resolver("deleteTodo").await?;
    let handlers = &handlers;

    run(service_fn(move |event: LambdaEvent<AppSyncResolverEvent<IdArguments>>| async move {
        handlers.delete_todo(event.payload).await.map_err(diagnostic)
    }))
    .await
}
