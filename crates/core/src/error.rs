use crate::store::StoreError;
use crate::types::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: TodoId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CoreError {
    /// Shorthand for a missing todo record.
    pub fn todo_not_found(id: TodoId) -> Self {
        Self::NotFound { entity: "Todo", id }
    }
}
