//! Storage gateway consumed by commands and read models.
//!
//! [`TodoStore`] is the only way the core touches persistence. Each method
//! is a single-record (or single-scan) operation; the gateway is expected to
//! make individual writes atomic but nothing spans more than one call.

pub mod memory;

use async_trait::async_trait;

use crate::todo::{Todo, TodoStatus};
use crate::types::TodoId;

pub use memory::InMemoryTodoStore;

/// Failures raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A stored record could not be turned back into a [`Todo`].
    #[error("Corrupt todo record {id}: {reason}")]
    Corrupt { id: TodoId, reason: String },
}

/// Persistence operations over the todo collection.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError>;

    /// Look up a single record.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// All records in natural storage order, optionally restricted to one status.
    async fn find_all(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>, StoreError>;

    /// Overwrite the record with `todo.id`. Returns `false` if no record matched.
    async fn update(&self, todo: &Todo) -> Result<bool, StoreError>;

    /// Remove the record with `id`, returning the number of records removed.
    async fn remove(&self, id: TodoId) -> Result<u64, StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
