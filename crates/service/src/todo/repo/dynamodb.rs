use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use tracing::debug;

use models::todo::{format_timestamp, parse_timestamp};
use models::TodoItem;

use crate::errors::ServiceError;
use crate::todo::repository::TodoRepository;

const ID: &str = "Id";
const TITLE: &str = "Title";
const DESCRIPTION: &str = "Description";
const COMPLETED: &str = "Completed";
const CREATED_AT: &str = "CreatedAt";
const UPDATED_AT: &str = "UpdatedAt";

/// DynamoDB-backed repository over a single table with string partition key `Id`.
#[derive(Clone)]
pub struct DynamoDbTodoRepository {
    client: Client,
    table: String,
}

impl DynamoDbTodoRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self { client, table: table.into() }
    }

    /// Client configured from the standard AWS environment (region, credentials, endpoint).
    pub async fn from_env(table: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table)
    }
}

fn store_error<E: std::error::Error>(err: E) -> ServiceError {
    ServiceError::Store(DisplayErrorContext(err).to_string())
}

pub(crate) fn to_item(item: &TodoItem) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (ID.to_string(), AttributeValue::S(item.id.clone())),
        (TITLE.to_string(), AttributeValue::S(item.title.clone())),
        (DESCRIPTION.to_string(), AttributeValue::S(item.description.clone())),
        (COMPLETED.to_string(), AttributeValue::Bool(item.completed)),
        (CREATED_AT.to_string(), AttributeValue::S(format_timestamp(&item.created_at))),
        (UPDATED_AT.to_string(), AttributeValue::S(format_timestamp(&item.updated_at))),
    ])
}

pub(crate) fn from_item(attrs: &HashMap<String, AttributeValue>) -> Result<TodoItem, ServiceError> {
    Ok(TodoItem {
        id: required_string(attrs, ID)?,
        title: optional_string(attrs, TITLE)?,
        description: optional_string(attrs, DESCRIPTION)?,
        completed: flag(attrs, COMPLETED)?,
        created_at: parse_timestamp(&required_string(attrs, CREATED_AT)?)?,
        updated_at: parse_timestamp(&required_string(attrs, UPDATED_AT)?)?,
    })
}

fn required_string(attrs: &HashMap<String, AttributeValue>, name: &str) -> Result<String, ServiceError> {
    match attrs.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        Some(other) => Err(ServiceError::Store(format!("attribute {name} is not a string: {other:?}"))),
        None => Err(ServiceError::Store(format!("attribute {name} missing"))),
    }
}

fn optional_string(attrs: &HashMap<String, AttributeValue>, name: &str) -> Result<String, ServiceError> {
    match attrs.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(String::new()),
        Some(_) => required_string(attrs, name),
    }
}

/// Booleans written by older clients are numbers (`1`/`0`); accept both encodings.
fn flag(attrs: &HashMap<String, AttributeValue>, name: &str) -> Result<bool, ServiceError> {
    match attrs.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(false),
        Some(AttributeValue::Bool(b)) => Ok(*b),
        Some(AttributeValue::N(n)) => Ok(n.trim() != "0"),
        Some(other) => Err(ServiceError::Store(format!("attribute {name} is not a boolean: {other:?}"))),
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn scan_all(&self) -> Result<Vec<TodoItem>, ServiceError> {
        let mut items = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let out = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(store_error)?;
            for attrs in out.items() {
                items.push(from_item(attrs)?);
            }
            match out.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }
        debug!(table = %self.table, count = items.len(), "scan_complete");
        Ok(items)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TodoItem>, ServiceError> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ID, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(store_error)?;
        out.item().map(from_item).transpose()
    }

    async fn put(&self, item: &TodoItem) -> Result<(), ServiceError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(item)))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn delete(&self, item: &TodoItem) -> Result<(), ServiceError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(ID, AttributeValue::S(item.id.clone()))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
