use async_trait::async_trait;

use models::TodoItem;

use crate::errors::ServiceError;

/// Keyed storage for to-do items. Implementations are DynamoDB, a JSON file, or the test mock.
///
/// Every failure is reported as `ServiceError::Store`; an absent key is `Ok(None)`, not an error.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every stored item. No ordering guarantee.
    async fn scan_all(&self) -> Result<Vec<TodoItem>, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<TodoItem>, ServiceError>;
    /// Insert or replace by `Id`.
    async fn put(&self, item: &TodoItem) -> Result<(), ServiceError>;
    async fn delete(&self, item: &TodoItem) -> Result<(), ServiceError>;
}

/// Instrumented in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct CallCounts {
        pub scans: usize,
        pub gets: usize,
        pub puts: usize,
        pub deletes: usize,
    }

    impl CallCounts {
        pub fn total(&self) -> usize { self.scans + self.gets + self.puts + self.deletes }
        pub fn mutations(&self) -> usize { self.puts + self.deletes }
    }

    #[derive(Default)]
    pub struct MockTodoRepository {
        items: Mutex<HashMap<String, TodoItem>>,
        calls: Mutex<CallCounts>,
        puts: Mutex<Vec<TodoItem>>,
        deletes: Mutex<Vec<TodoItem>>,
        fault: Mutex<Option<String>>,
    }

    impl MockTodoRepository {
        pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
            let repo = Self::default();
            for item in items {
                repo.seed(item);
            }
            repo
        }

        /// Store an item without counting it as a call.
        pub fn seed(&self, item: TodoItem) {
            self.items.lock().unwrap().insert(item.id.clone(), item);
        }

        /// Make every subsequent call fail with a store error.
        pub fn fail_with(&self, message: &str) {
            *self.fault.lock().unwrap() = Some(message.to_string());
        }

        pub fn calls(&self) -> CallCounts { *self.calls.lock().unwrap() }

        /// Items passed to `put`, in call order.
        pub fn put_log(&self) -> Vec<TodoItem> { self.puts.lock().unwrap().clone() }

        /// Items passed to `delete`, in call order.
        pub fn delete_log(&self) -> Vec<TodoItem> { self.deletes.lock().unwrap().clone() }

        pub fn stored(&self, id: &str) -> Option<TodoItem> { self.items.lock().unwrap().get(id).cloned() }

        fn record(&self, f: impl FnOnce(&mut CallCounts)) -> Result<(), ServiceError> {
            f(&mut *self.calls.lock().unwrap());
            match self.fault.lock().unwrap().as_ref() {
                Some(msg) => Err(ServiceError::Store(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl TodoRepository for MockTodoRepository {
        async fn scan_all(&self) -> Result<Vec<TodoItem>, ServiceError> {
            self.record(|c| c.scans += 1)?;
            Ok(self.items.lock().unwrap().values().cloned().collect())
        }

        async fn get_by_id(&self, id: &str) -> Result<Option<TodoItem>, ServiceError> {
            self.record(|c| c.gets += 1)?;
            Ok(self.items.lock().unwrap().get(id).cloned())
        }

        async fn put(&self, item: &TodoItem) -> Result<(), ServiceError> {
            self.record(|c| c.puts += 1)?;
            self.puts.lock().unwrap().push(item.clone());
            self.items.lock().unwrap().insert(item.id.clone(), item.clone());
            Ok(())
        }

        async fn delete(&self, item: &TodoItem) -> Result<(), ServiceError> {
            self.record(|c| c.deletes += 1)?;
            self.deletes.lock().unwrap().push(item.clone());
            self.items.lock().unwrap().remove(&item.id);
            Ok(())
        }
    }
}
