//! Todo repository: the five logical data operations over a [`TodoStore`]
//!
//! Stateless. The repository trusts its caller; ownership checks happen in the
//! handlers before any mutating call.

use tracing::{error, info};

use crate::errors::{Error, Result};
use crate::models::TodoItem;
use crate::store::TodoStore;

pub struct TodoRepository<S> {
    store: S,
}

impl<S: TodoStore> TodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(any(test, feature = "test-util"))]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All todos of `owner_id`, most recently created first
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TodoItem>> {
        info!(user_id = %owner_id, "Getting all todos for user");
        self.store.query_by_owner(owner_id).await
    }

    /// Store a fully populated item and hand it back
    pub async fn create(&self, item: TodoItem) -> Result<TodoItem> {
        info!(user_id = %item.owner_id, todo_id = %item.todo_id, "Creating todo");
        self.store.put(&item).await?;
        Ok(item)
    }

    /// Resolve a todo through the todo ID index
    ///
    /// Zero matches is `TodoNotFound`; more than one means the index no longer
    /// holds a unique identifier and is reported as `Integrity`.
    pub async fn find_by_id(&self, todo_id: &str) -> Result<TodoItem> {
        info!(todo_id = %todo_id, "Getting todo by id");
        let mut items = self.store.query_by_todo_id(todo_id).await?;

        match items.len() {
            0 => Err(Error::TodoNotFound(todo_id.to_string())),
            1 => Ok(items.remove(0)),
            count => {
                error!(todo_id = %todo_id, count = count, "Todo id index returned duplicate records");
                Err(Error::Integrity(format!(
                    "{} records share todo id {}",
                    count, todo_id
                )))
            }
        }
    }

    /// Overwrite the record at the item's primary key
    pub async fn update_whole(&self, item: &TodoItem) -> Result<()> {
        info!(user_id = %item.owner_id, todo_id = %item.todo_id, "Updating todo");
        self.store.put(item).await
    }

    /// Remove the record at (`owner_id`, `created_at`)
    pub async fn delete_by_key(&self, owner_id: &str, created_at: &str) -> Result<()> {
        info!(user_id = %owner_id, created_at = %created_at, "Deleting todo");
        self.store.delete(owner_id, created_at).await
    }
}
