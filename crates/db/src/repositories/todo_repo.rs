//! Repository for the `todos` table.

use async_trait::async_trait;
use sqlx::PgPool;
use todo_core::store::{StoreError, TodoStore};
use todo_core::todo::{Todo, TodoStatus};
use todo_core::types::TodoId;

use crate::models::todo::TodoRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, description, due_date, priority, status, \
    completion_notes, actual_completion_date, time_spent_minutes, satisfaction_rating, \
    reopen_reason, priority_adjustment, estimated_effort_hours, \
    deletion_reason, deletion_comment, confirm_deletion, retain_for_days, \
    created_at, updated_at";

/// Natural storage order: creation time, ties broken by id.
const ORDER: &str = "ORDER BY created_at, id";

/// Provides CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo row.
    pub async fn insert(pool: &PgPool, todo: &Todo) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO todos (
                id, title, description, due_date, priority, status,
                completion_notes, actual_completion_date, time_spent_minutes, satisfaction_rating,
                reopen_reason, priority_adjustment, estimated_effort_hours,
                deletion_reason, deletion_comment, confirm_deletion, retain_for_days,
                created_at, updated_at
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                       $11, $12, $13, $14, $15, $16, $17, $18, $19)",
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.due_date)
        .bind(&todo.priority)
        .bind(todo.status.as_str())
        .bind(&todo.completion_notes)
        .bind(&todo.actual_completion_date)
        .bind(&todo.time_spent_minutes)
        .bind(&todo.satisfaction_rating)
        .bind(&todo.reopen_reason)
        .bind(&todo.priority_adjustment)
        .bind(&todo.estimated_effort_hours)
        .bind(&todo.deletion_reason)
        .bind(&todo.deletion_comment)
        .bind(&todo.confirm_deletion)
        .bind(&todo.retain_for_days)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a todo row by id.
    pub async fn find_by_id(pool: &PgPool, id: TodoId) -> Result<Option<TodoRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, TodoRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List todo rows in natural order, optionally restricted to one status.
    pub async fn list(
        pool: &PgPool,
        status: Option<TodoStatus>,
    ) -> Result<Vec<TodoRow>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!("SELECT {COLUMNS} FROM todos WHERE status = $1 {ORDER}");
                sqlx::query_as::<_, TodoRow>(&query)
                    .bind(status.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM todos {ORDER}");
                sqlx::query_as::<_, TodoRow>(&query).fetch_all(pool).await
            }
        }
    }

    /// Overwrite every mutable column of the row matching `todo.id`.
    ///
    /// Returns `false` if no row matched.
    pub async fn update(pool: &PgPool, todo: &Todo) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE todos SET
                title = $2,
                description = $3,
                due_date = $4,
                priority = $5,
                status = $6,
                completion_notes = $7,
                actual_completion_date = $8,
                time_spent_minutes = $9,
                satisfaction_rating = $10,
                reopen_reason = $11,
                priority_adjustment = $12,
                estimated_effort_hours = $13,
                deletion_reason = $14,
                deletion_comment = $15,
                confirm_deletion = $16,
                retain_for_days = $17,
                updated_at = $18
             WHERE id = $1",
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.due_date)
        .bind(&todo.priority)
        .bind(todo.status.as_str())
        .bind(&todo.completion_notes)
        .bind(&todo.actual_completion_date)
        .bind(&todo.time_spent_minutes)
        .bind(&todo.satisfaction_rating)
        .bind(&todo.reopen_reason)
        .bind(&todo.priority_adjustment)
        .bind(&todo.estimated_effort_hours)
        .bind(&todo.deletion_reason)
        .bind(&todo.deletion_comment)
        .bind(&todo.confirm_deletion)
        .bind(&todo.retain_for_days)
        .bind(todo.updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a todo. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: TodoId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// [`TodoStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    tracing::debug!(error = %err, "Todo query failed");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        TodoRepo::insert(&self.pool, todo).await.map_err(backend)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        TodoRepo::find_by_id(&self.pool, id)
            .await
            .map_err(backend)?
            .map(Todo::try_from)
            .transpose()
    }

    async fn find_all(&self, status: Option<TodoStatus>) -> Result<Vec<Todo>, StoreError> {
        TodoRepo::list(&self.pool, status)
            .await
            .map_err(backend)?
            .into_iter()
            .map(Todo::try_from)
            .collect()
    }

    async fn update(&self, todo: &Todo) -> Result<bool, StoreError> {
        TodoRepo::update(&self.pool, todo).await.map_err(backend)
    }

    async fn remove(&self, id: TodoId) -> Result<u64, StoreError> {
        TodoRepo::delete(&self.pool, id).await.map_err(backend)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(backend)
    }
}
