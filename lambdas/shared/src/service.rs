//! Todo service: what the Lambda handlers call
//!
//! Builds new items, applies the configured merge policy and drives the
//! attachment flow. Every store failure surfaces unchanged.

use aws_config::BehaviorVersion;
use tracing::info;

use crate::config::Config;
use crate::dynamo::DynamoStore;
use crate::errors::Result;
use crate::models::{CreateTodoRequest, TodoItem, TodoPatch};
use crate::repository::TodoRepository;
use crate::signer::{attachment_url, S3UploadSigner, UploadUrlSigner};
use crate::store::TodoStore;

pub struct TodoService<S, U> {
    repository: TodoRepository<S>,
    signer: U,
    config: Config,
}

/// Service wired to DynamoDB and S3
pub type AwsTodoService = TodoService<DynamoStore, S3UploadSigner>;

impl AwsTodoService {
    /// Load configuration and AWS clients from the environment
    pub async fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let store = DynamoStore::from_sdk_config(&sdk_config, &config);
        let signer = S3UploadSigner::from_sdk_config(&sdk_config);

        info!(
            table = %config.table_name,
            index = %config.todo_id_index,
            bucket = %config.bucket_name,
            merge_policy = config.merge_policy.as_str(),
            "Todo service configured"
        );

        Ok(TodoService::new(store, signer, config))
    }
}

impl<S: TodoStore, U: UploadUrlSigner> TodoService<S, U> {
    pub fn new(store: S, signer: U, config: Config) -> Self {
        Self {
            repository: TodoRepository::new(store),
            signer,
            config,
        }
    }

    pub fn repository(&self) -> &TodoRepository<S> {
        &self.repository
    }

    pub async fn todos_for_user(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        self.repository.list_by_owner(user_id).await
    }

    pub async fn create_todo(&self, user_id: &str, req: CreateTodoRequest) -> Result<TodoItem> {
        let item = TodoItem::new(user_id.to_string(), req);
        self.repository.create(item).await
    }

    pub async fn todo_by_id(&self, todo_id: &str) -> Result<TodoItem> {
        self.repository.find_by_id(todo_id).await
    }

    /// Merge `patch` onto `existing` and persist the whole record
    pub async fn update_todo(&self, existing: &TodoItem, patch: &TodoPatch) -> Result<TodoItem> {
        let merged = self.config.merge_policy.merge(existing, patch);
        self.repository.update_whole(&merged).await?;
        Ok(merged)
    }

    pub async fn delete_todo(&self, todo: &TodoItem) -> Result<()> {
        self.repository
            .delete_by_key(&todo.owner_id, &todo.created_at)
            .await
    }

    /// Record the attachment's public URL on the todo, then presign an upload
    /// for the same key. The record is persisted before the URL is issued.
    pub async fn attachment_upload_url(&self, todo: &TodoItem) -> Result<String> {
        let bucket = &self.config.bucket_name;
        let updated = TodoItem {
            attachment_url: Some(attachment_url(bucket, &todo.todo_id)),
            ..todo.clone()
        };
        self.repository.update_whole(&updated).await?;

        let upload_url = self
            .signer
            .sign_upload_url(bucket, &todo.todo_id, self.config.signed_url_expiration)
            .await?;

        info!(todo_id = %todo.todo_id, "Upload url signed");
        Ok(upload_url)
    }
}
