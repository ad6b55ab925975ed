//! Generate Upload URL Lambda
//!
//! Handles POST /todos/{todoId}/attachment - records the attachment URL on the
//! todo and returns a presigned S3 upload URL for it

use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use todo_core::http::{error_response, json_response, path_param, with_cors};
use todo_core::{auth, AwsTodoService, Result, TodoService, TodoStore, UploadUrlResponse, UploadUrlSigner};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn upload_url<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: &Request,
) -> Result<String> {
    let user_id = auth::user_id(event)?;
    let todo_id = path_param(event, "todoId")?;

    let todo = service.todo_by_id(&todo_id).await?;
    auth::ensure_owner(&user_id, &todo)?;

    info!(user_id = %user_id, todo_id = %todo_id, "User is authorized to upload attachment to todo");

    service.attachment_upload_url(&todo).await
}

async fn respond<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: &Request,
) -> std::result::Result<Response<Body>, LambdaError> {
    match upload_url(service, event).await {
        Ok(upload_url) => json_response(200, &UploadUrlResponse { upload_url }),
        Err(e) => error_response(e),
    }
}

async fn handler<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: Request,
) -> std::result::Result<Response<Body>, LambdaError> {
    let response = respond(service, &event).await?;
    Ok(with_cors(&event, response))
}

#[tokio::main]
async fn main() -> std::result::Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let service = AwsTodoService::from_env().await?;
    let service = &service;

    run(service_fn(move |event| async move { handler(service, event).await })).await
}
