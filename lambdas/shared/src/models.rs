//! Domain models for the todo backend
//!
//! - Todo items: the only stored entity, keyed by owner and creation time
//! - Requests: create payloads and sparse update patches
//! - Responses: the JSON envelopes returned by the handlers

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored todo item
///
/// Attribute names match the DynamoDB table: `userId` is the partition key,
/// `createdAt` the sort key and `todoId` the key of the secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Identity of the creating user
    #[serde(rename = "userId")]
    pub owner_id: String,
    /// Creation time, ISO-8601
    pub created_at: String,
    /// Globally unique identifier
    pub todo_id: String,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    /// Public URL of the uploaded attachment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Build a new item for `owner_id`: fresh ID, current timestamp, not done.
    pub fn new(owner_id: String, req: CreateTodoRequest) -> Self {
        Self {
            owner_id,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            todo_id: Uuid::new_v4().to_string(),
            name: req.name,
            due_date: req.due_date,
            done: false,
            attachment_url: None,
        }
    }
}

/// Request to create a todo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

/// Sparse update applied on top of an existing todo
///
/// Absent fields deserialize to `None`. How present-but-falsy values are
/// treated depends on the [`MergePolicy`](crate::merge::MergePolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

/// Request body of `PATCH /todos/{todoId}`
pub type UpdateTodoRequest = TodoPatch;

/// Single item envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: TodoItem,
}

/// Item list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<TodoItem>,
}

/// Presigned upload URL envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
