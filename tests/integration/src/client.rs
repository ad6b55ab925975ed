//! Todo API client for testing

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// API client for the todo backend
pub struct TodoClient {
    client: Client,
    base_url: String,
    token: String,
}

// Request/Response types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: String,
    pub created_at: String,
    pub todo_id: String,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub item: Todo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Todo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub upload_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Result type for API responses
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// HTTP error with status code and body
    Http { status: StatusCode, body: String },
    /// Network or serialization error
    Request(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl TodoClient {
    /// Create a new client with the given base URL and bearer token
    pub fn new(base_url: &str, token: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Create a client from `TODO_API_URL` and `TODO_API_TOKEN`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("TODO_API_URL").expect("TODO_API_URL environment variable not set");
        let token = std::env::var("TODO_API_TOKEN").expect("TODO_API_TOKEN environment variable not set");
        Self::new(&base_url, &token)
    }

    /// Same API, different caller
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.to_string(),
        }
    }

    // =========================================================================
    // Todo Operations
    // =========================================================================

    pub async fn list_todos(&self) -> ApiResult<ItemsResponse> {
        let request = self.client.get(self.url("/todos"));
        self.json(request).await
    }

    pub async fn create_todo(&self, req: &CreateTodoRequest) -> ApiResult<ItemResponse> {
        let request = self.client.post(self.url("/todos")).json(req);
        self.json(request).await
    }

    pub async fn update_todo(&self, todo_id: &str, req: &UpdateTodoRequest) -> ApiResult<()> {
        let request = self
            .client
            .patch(self.url(&format!("/todos/{}", todo_id)))
            .json(req);
        self.empty(request).await
    }

    pub async fn delete_todo(&self, todo_id: &str) -> ApiResult<()> {
        let request = self.client.delete(self.url(&format!("/todos/{}", todo_id)));
        self.empty(request).await
    }

    pub async fn upload_url(&self, todo_id: &str) -> ApiResult<UploadUrlResponse> {
        let request = self
            .client
            .post(self.url(&format!("/todos/{}/attachment", todo_id)));
        self.json(request).await
    }

    // =========================================================================
    // HTTP Helpers
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<(StatusCode, String)> {
        let response: Response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if status.is_success() {
            Ok((status, body))
        } else {
            Err(ApiError::Http { status, body })
        }
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let (_, body) = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Request(e.to_string()))
    }

    async fn empty(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }
}
