//! DynamoDB-backed todo store
//!
//! Table layout:
//!
//! | Key            | Attribute   | Purpose                          |
//! |----------------|-------------|----------------------------------|
//! | partition key  | `userId`    | owner of the todo                |
//! | sort key       | `createdAt` | ISO-8601 creation time           |
//! | GSI partition  | `todoId`    | direct lookup by todo identifier |
//!
//! Each method issues exactly one request. Nothing is retried here beyond what
//! the SDK's own retry policy does.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_items, to_item};
use tracing::info;

use crate::config::{Config, OFFLINE_DYNAMODB_ENDPOINT};
use crate::errors::{Error, Result};
use crate::models::TodoItem;
use crate::store::TodoStore;

const OWNER_KEY: &str = "userId";
const SORT_KEY: &str = "createdAt";
const TODO_ID_KEY: &str = "todoId";

/// DynamoDB client for todo items
pub struct DynamoStore {
    client: Client,
    table_name: String,
    todo_id_index: String,
}

impl DynamoStore {
    /// Create a store over an existing SDK client
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            todo_id_index: config.todo_id_index.clone(),
        }
    }

    /// Build the SDK client from shared AWS config, targeting DynamoDB Local
    /// when running offline
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &Config) -> Self {
        let client = if config.offline {
            info!(endpoint = OFFLINE_DYNAMODB_ENDPOINT, "Creating a local DynamoDB client");
            let dynamo_config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
                .endpoint_url(OFFLINE_DYNAMODB_ENDPOINT)
                .build();
            Client::from_conf(dynamo_config)
        } else {
            Client::new(sdk_config)
        };
        Self::new(client, config)
    }

    fn decode(items: Option<Vec<HashMap<String, AttributeValue>>>) -> Result<Vec<TodoItem>> {
        from_items(items.unwrap_or_default()).map_err(|e| Error::DynamoSerialization(e.to_string()))
    }
}

#[async_trait]
impl TodoStore for DynamoStore {
    async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<TodoItem>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#owner = :owner")
            .expression_attribute_names("#owner", OWNER_KEY)
            .expression_attribute_values(":owner", AttributeValue::S(owner_id.to_string()))
            .scan_index_forward(false)
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::decode(result.items)
    }

    async fn query_by_todo_id(&self, todo_id: &str) -> Result<Vec<TodoItem>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.todo_id_index)
            .key_condition_expression("#id = :id")
            .expression_attribute_names("#id", TODO_ID_KEY)
            .expression_attribute_values(":id", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Self::decode(result.items)
    }

    async fn put(&self, item: &TodoItem) -> Result<()> {
        let item: HashMap<String, AttributeValue> = to_item(item).map_err(|e| Error::DynamoSerialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, owner_id: &str, created_at: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(OWNER_KEY, AttributeValue::S(owner_id.to_string()))
            .key(SORT_KEY, AttributeValue::S(created_at.to_string()))
            .send()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
