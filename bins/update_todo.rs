use functions::appsync::AppSyncResolverEvent;
use functions::errors::diagnostic;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use models::UpdateTodoItem;

/// `updateTodo` resolver.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let handlers = functions::bootstrap::resolver("updateTodo").await?;
    let handlers = &handlers;

    run(service_fn(move |event: LambdaEvent<AppSyncResolverEvent<UpdateTodoItem>>| async move {
        handlers.update_todo(event.payload).await.map_err(diagnostic)
    }))
    .await
}
