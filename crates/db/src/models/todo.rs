//! Row model for the `todos` table.

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::FromRow;
use todo_core::store::StoreError;
use todo_core::todo::{Todo, TodoStatus};
use todo_core::types::{Timestamp, TodoId};

/// A row from the `todos` table. `status` is kept as text until converted.
#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub status: String,
    pub completion_notes: Option<Value>,
    pub actual_completion_date: Option<Value>,
    pub time_spent_minutes: Option<Value>,
    pub satisfaction_rating: Option<Value>,
    pub reopen_reason: Option<Value>,
    pub priority_adjustment: Option<Value>,
    pub estimated_effort_hours: Option<Value>,
    pub deletion_reason: Option<Value>,
    pub deletion_comment: Option<Value>,
    pub confirm_deletion: Option<Value>,
    pub retain_for_days: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let status: TodoStatus = row.status.parse().map_err(|_| StoreError::Corrupt {
            id: row.id,
            reason: format!("unknown status '{}'", row.status),
        })?;

        Ok(Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            priority: row.priority,
            status,
            completion_notes: row.completion_notes,
            actual_completion_date: row.actual_completion_date,
            time_spent_minutes: row.time_spent_minutes,
            satisfaction_rating: row.satisfaction_rating,
            reopen_reason: row.reopen_reason,
            priority_adjustment: row.priority_adjustment,
            estimated_effort_hours: row.estimated_effort_hours,
            deletion_reason: row.deletion_reason,
            deletion_comment: row.deletion_comment,
            confirm_deletion: row.confirm_deletion,
            retain_for_days: row.retain_for_days,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
