//! Create Todo Lambda
//!
//! Handles POST /todos

use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, Response};
use todo_core::http::{body_bytes, error_response, json_response, with_cors};
use todo_core::validation::parse_create_request;
use todo_core::{auth, AwsTodoService, ItemResponse, TodoService, TodoStore, UploadUrlSigner};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn respond<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: &Request,
) -> Result<Response<Body>, LambdaError> {
    let user_id = match auth::user_id(event) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    info!(user_id = %user_id, "Processing create todo request");

    let req = match parse_create_request(body_bytes(event)) {
        Ok(req) => req,
        Err(e) => return error_response(e),
    };

    match service.create_todo(&user_id, req).await {
        Ok(item) => {
            info!(user_id = %user_id, todo_id = %item.todo_id, "Todo created");
            json_response(201, &ItemResponse { item })
        }
        Err(e) => error_response(e),
    }
}

async fn handler<S: TodoStore, U: UploadUrlSigner>(
    service: &TodoService<S, U>,
    event: Request,
) -> Result<Response<Body>, LambdaError> {
    let response = respond(service, &event).await?;
    Ok(with_cors(&event, response))
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
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
