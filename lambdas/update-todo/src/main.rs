//! Update Todo Lambda
//!
//! Handles PATCH /todos/{todoId}

use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use todo_core::http::{body_bytes, empty_response, error_response, path_param, with_cors};
use todo_core::validation::parse_update_request;
use todo_core::{auth, AwsTodoService, Result, TodoItem, TodoService, TodoStore, UploadUrlSigner};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn update<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: &Request,
) -> Result<TodoItem> {
    let user_id = auth::user_id(event)?;
    let todo_id = path_param(event, "todoId")?;

    info!(user_id = %user_id, todo_id = %todo_id, "Processing update todo request");

    let patch = parse_update_request(body_bytes(event))?;
    let existing = service.todo_by_id(&todo_id).await?;
    auth::ensure_owner(&user_id, &existing)?;

    service.update_todo(&existing, &patch).await
}

async fn respond<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: &Request,
) -> std::result::Result<Response<Body>, LambdaError> {
    match update(service, event).await {
        Ok(item) => {
            info!(todo_id = %item.todo_id, done = item.done, "Todo updated");
            empty_response(204)
        }
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
