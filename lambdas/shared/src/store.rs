//! Store contract consumed by the repository
//!
//! Kept as small as the DynamoDB calls it stands for, so the repository logic
//! can run against an in-memory store in tests and against
//! [`DynamoStore`](crate::dynamo::DynamoStore) in Lambda.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::TodoItem;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All items in the owner's partition, newest `createdAt` first
    async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<TodoItem>>;

    /// Every item the todo ID index holds for `todo_id`
    async fn query_by_todo_id(&self, todo_id: &str) -> Result<Vec<TodoItem>>;

    /// Unconditional upsert at the item's primary key
    async fn put(&self, item: &TodoItem) -> Result<()>;

    /// Remove the item at (`owner_id`, `created_at`); absent keys are not an error
    async fn delete(&self, owner_id: &str, created_at: &str) -> Result<()>;
}

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStore;

#[cfg(any(test, feature = "test-util"))]
mod memory {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::TodoStore;
    use crate::errors::{Error, Result};
    use crate::models::TodoItem;

    /// In-process store with the same key and ordering rules as the table
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        items: Mutex<Vec<TodoItem>>,
        requests: AtomicUsize,
        unavailable: AtomicBool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Store pre-seeded with `items`, inserted through the normal upsert path
        pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
            let store = Self::new();
            {
                let mut guard = store.lock();
                for item in items {
                    upsert(&mut guard, item);
                }
            }
            store
        }

        /// Number of store requests served so far
        pub fn requests(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }

        /// Make every subsequent request fail with a database error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        /// Snapshot of everything stored, in insertion order
        pub fn items(&self) -> Vec<TodoItem> {
            self.lock().clone()
        }

        fn begin_request(&self) -> Result<()> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(Error::Database("store unavailable".to_string()));
            }
            Ok(())
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TodoItem>> {
            // a panicking test thread must not wedge the others
            self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    fn upsert(items: &mut Vec<TodoItem>, item: TodoItem) {
        match items
            .iter_mut()
            .find(|i| i.owner_id == item.owner_id && i.created_at == item.created_at)
        {
            Some(slot) => *slot = item,
            None => items.push(item),
        }
    }

    #[async_trait]
    impl TodoStore for MemoryStore {
        async fn query_by_owner(&self, owner_id: &str) -> Result<Vec<TodoItem>> {
            self.begin_request()?;
            let mut found: Vec<TodoItem> = self
                .lock()
                .iter()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(found)
        }

        async fn query_by_todo_id(&self, todo_id: &str) -> Result<Vec<TodoItem>> {
            self.begin_request()?;
            Ok(self
                .lock()
                .iter()
                .filter(|i| i.todo_id == todo_id)
                .cloned()
                .collect())
        }

        async fn put(&self, item: &TodoItem) -> Result<()> {
            self.begin_request()?;
            upsert(&mut self.lock(), item.clone());
            Ok(())
        }

        async fn delete(&self, owner_id: &str, created_at: &str) -> Result<()> {
            self.begin_request()?;
            self.lock()
                .retain(|i| !(i.owner_id == owner_id && i.created_at == created_at));
            Ok(())
        }
    }
}
