use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

/// Lambda authorizer. Takes the raw payload so unreadable events are denied, not failed.
#[tokio::main]
async fn main() -> Result<(), Error> {
    let authorizer = functions::bootstrap::authorizer()?;
    let authorizer = &authorizer;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<_, Error>(authorizer.handle_raw(event.payload))
    }))
    .await
}
