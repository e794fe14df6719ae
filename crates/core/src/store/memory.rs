//! Process-local [`TodoStore`] backed by an insertion-ordered map.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore};
use crate::todo::{Todo, TodoStatus};
use crate::types::TodoId;

/// Keeps every todo in memory, in insertion order. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    todos: RwLock<IndexMap<TodoId, Todo>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut todos = self.todos.write().await;
        if todos.contains_key(&todo.id) {
            return Err(StoreError::Backend(format!(
                "duplicate todo id {}",
                todo.id
            )));
        }
        todos.insert(todo.id, todo.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.read().await.get(&id).cloned())
    }

    async fn find_all(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos
            .values()
            .filter(|todo| status.map_or(true, |s| todo.status == s))
            .cloned()
            .collect())
    }

    async fn update(&self, todo: &Todo) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo.id) {
            Some(existing) => {
                *existing = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: TodoId) -> Result<u64, StoreError> {
        let removed = self.todos.write().await.shift_remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
