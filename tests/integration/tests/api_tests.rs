//! Integration tests for the todo API
//!
//! Run with: TODO_API_URL=https://your-api.execute-api.us-east-1.amazonaws.com/dev \
//!           TODO_API_TOKEN=<id token> cargo test
//!
//! These tests require a deployed stage.

use pretty_assertions::assert_eq;
use todo_integration_tests::{
    client::{ApiError, CreateTodoRequest, TodoClient, UpdateTodoRequest},
    fixtures::{other_user_token, unique_todo_name},
    skip_if_no_api,
};

/// Helper to get client or skip test
fn get_client() -> Option<TodoClient> {
    skip_if_no_api!(None);
    Some(TodoClient::from_env())
}

fn new_todo() -> CreateTodoRequest {
    CreateTodoRequest {
        name: unique_todo_name(),
        due_date: "2030-01-01".to_string(),
    }
}

fn status_of<T: std::fmt::Debug>(result: Result<T, ApiError>) -> u16 {
    match result {
        Err(ApiError::Http { status, .. }) => status.as_u16(),
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

// ============================================================================
// Create / List
// ============================================================================

#[tokio::test]
async fn test_create_todo() {
    let Some(client) = get_client() else { return };

    let req = new_todo();
    let created = client
        .create_todo(&req)
        .await
        .expect("Failed to create todo")
        .item;

    assert_eq!(created.name, req.name);
    assert_eq!(created.due_date, req.due_date);
    assert!(!created.done);
    assert!(!created.todo_id.is_empty());
    assert!(created.attachment_url.is_none());

    // Cleanup
    let _ = client.delete_todo(&created.todo_id).await;
}

#[tokio::test]
async fn test_create_todo_validation() {
    let Some(client) = get_client() else { return };

    let result = client
        .create_todo(&CreateTodoRequest {
            name: String::new(),
            due_date: "2030-01-01".to_string(),
        })
        .await;

    assert_eq!(status_of(result), 400);
}

#[tokio::test]
async fn test_list_todos_newest_first() {
    let Some(client) = get_client() else { return };

    let first = client.create_todo(&new_todo()).await.expect("create").item;
    let second = client.create_todo(&new_todo()).await.expect("create").item;

    let items = client.list_todos().await.expect("Failed to list todos").items;
    let first_pos = items.iter().position(|t| t.todo_id == first.todo_id);
    let second_pos = items.iter().position(|t| t.todo_id == second.todo_id);

    assert!(first_pos.is_some() && second_pos.is_some());
    assert!(second_pos < first_pos, "newest todo should come first");

    // Cleanup
    let _ = client.delete_todo(&first.todo_id).await;
    let _ = client.delete_todo(&second.todo_id).await;
}

// ============================================================================
// Update / Delete
// ============================================================================

#[tokio::test]
async fn test_update_todo() {
    let Some(client) = get_client() else { return };

    let created = client.create_todo(&new_todo()).await.expect("create").item;

    client
        .update_todo(
            &created.todo_id,
            &UpdateTodoRequest {
                done: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update todo");

    let items = client.list_todos().await.expect("list").items;
    let updated = items
        .iter()
        .find(|t| t.todo_id == created.todo_id)
        .expect("updated todo missing");

    assert!(updated.done);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.created_at, created.created_at);

    // Cleanup
    let _ = client.delete_todo(&created.todo_id).await;
}

#[tokio::test]
async fn test_update_nonexistent_todo_fails() {
    let Some(client) = get_client() else { return };

    let result = client
        .update_todo(
            "00000000-0000-0000-0000-000000000000",
            &UpdateTodoRequest {
                done: Some(true),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(status_of(result), 404);
}

#[tokio::test]
async fn test_delete_todo() {
    let Some(client) = get_client() else { return };

    let created = client.create_todo(&new_todo()).await.expect("create").item;

    client
        .delete_todo(&created.todo_id)
        .await
        .expect("Failed to delete todo");

    let items = client.list_todos().await.expect("list").items;
    assert!(!items.iter().any(|t| t.todo_id == created.todo_id));
}

#[tokio::test]
async fn test_other_user_cannot_delete() {
    let Some(client) = get_client() else { return };
    let Some(token) = other_user_token() else {
        eprintln!("Skipping: TODO_API_OTHER_TOKEN not set");
        return;
    };

    let created = client.create_todo(&new_todo()).await.expect("create").item;
    let intruder = client.with_token(&token);

    assert_eq!(status_of(intruder.delete_todo(&created.todo_id).await), 403);

    // Cleanup
    let _ = client.delete_todo(&created.todo_id).await;
}

// ============================================================================
// Attachments
// ============================================================================

#[tokio::test]
async fn test_upload_url_records_attachment() {
    let Some(client) = get_client() else { return };

    let created = client.create_todo(&new_todo()).await.expect("create").item;

    let response = client
        .upload_url(&created.todo_id)
        .await
        .expect("Failed to get upload url");
    assert!(response.upload_url.contains(&created.todo_id));

    let items = client.list_todos().await.expect("list").items;
    let todo = items
        .iter()
        .find(|t| t.todo_id == created.todo_id)
        .expect("todo missing");

    let attachment_url = todo.attachment_url.as_deref().expect("attachment url not set");
    assert!(attachment_url.starts_with("https://"));
    assert!(attachment_url.ends_with(&format!(".s3.amazonaws.com/{}", created.todo_id)));

    // Cleanup
    let _ = client.delete_todo(&created.todo_id).await;
}
