//! Todo entity, status lifecycle, and the pure transitions between states.
//!
//! Every mutation is a [`TodoChange`] applied to a snapshot with
//! [`Todo::apply`], producing the next snapshot. Loading and persisting the
//! snapshot is the job of [`crate::commands`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{Timestamp, TodoId};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of a todo.
///
/// `Deleted` exists in the vocabulary and is rejected by completion, but the
/// delete command removes the record rather than transitioning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoStatus {
    Active,
    Completed,
    Deleted,
}

impl TodoStatus {
    /// All valid statuses, in lifecycle order.
    pub const ALL: [TodoStatus; 3] = [Self::Active, Self::Completed, Self::Deleted];

    /// Wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid todo status '{s}'. Must be one of: Active, Completed, Deleted"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// The todo entity.
///
/// `id` is serialized under both `id` and `todoID`, so the two can never
/// diverge. `title` is non-blank for every snapshot produced by
/// [`Todo::new`] and [`Todo::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub status: TodoStatus,
    /// Completion fields: only populated while `status` is `Completed`.
    /// Stored as the JSON values the client sent.
    pub completion_notes: Option<Value>,
    pub actual_completion_date: Option<Value>,
    pub time_spent_minutes: Option<Value>,
    pub satisfaction_rating: Option<Value>,
    pub reopen_reason: Option<Value>,
    pub priority_adjustment: Option<Value>,
    pub estimated_effort_hours: Option<Value>,
    /// Legacy deletion fields; accepted in whatever shape older clients send.
    pub deletion_reason: Option<Value>,
    pub deletion_comment: Option<Value>,
    pub confirm_deletion: Option<Value>,
    pub retain_for_days: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a todo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub deletion_reason: Option<Value>,
    pub deletion_comment: Option<Value>,
    pub confirm_deletion: Option<Value>,
    pub retain_for_days: Option<Value>,
}

/// Detail fields to overwrite. Absent or blank values leave the field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
}

/// Completion details, stored exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDetails {
    pub completion_notes: Option<Value>,
    pub actual_completion_date: Option<Value>,
    pub time_spent_minutes: Option<Value>,
    pub satisfaction_rating: Option<Value>,
}

/// Optional context supplied when a todo is reopened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReopenDetails {
    pub reopen_reason: Option<Value>,
    pub due_date: Option<String>,
    pub priority_adjustment: Option<Value>,
    pub estimated_effort_hours: Option<Value>,
}

/// A mutation of an existing todo.
#[derive(Debug, Clone)]
pub enum TodoChange {
    Details(DetailsPatch),
    Complete(CompletionDetails),
    Reopen(ReopenDetails),
}

impl TodoChange {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Details(_) => "update_details",
            Self::Complete(_) => "mark_completed",
            Self::Reopen(_) => "mark_reopened",
        }
    }
}

impl Todo {
    /// Build a fresh `Active` todo from a creation payload.
    pub fn new(id: TodoId, input: NewTodo, now: Timestamp) -> Result<Self, CoreError> {
        let title = non_blank(input.title)
            .ok_or_else(|| CoreError::Validation("Title is required".to_string()))?;
        let due_date = parse_due_date(input.due_date)?;

        Ok(Self {
            id,
            title,
            description: input.description,
            due_date,
            priority: input.priority,
            status: TodoStatus::Active,
            completion_notes: None,
            actual_completion_date: None,
            time_spent_minutes: None,
            satisfaction_rating: None,
            reopen_reason: None,
            priority_adjustment: None,
            estimated_effort_hours: None,
            deletion_reason: input.deletion_reason,
            deletion_comment: input.deletion_comment,
            confirm_deletion: input.confirm_deletion,
            retain_for_days: input.retain_for_days,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply `change` and return the next snapshot.
    ///
    /// `id` and `created_at` are never changed. `updated_at` becomes `now`.
    pub fn apply(mut self, change: TodoChange, now: Timestamp) -> Result<Self, CoreError> {
        match change {
            TodoChange::Details(patch) => {
                let due_date = parse_due_date(patch.due_date)?;
                if let Some(title) = non_blank(patch.title) {
                    self.title = title;
                }
                if let Some(description) = non_blank(patch.description) {
                    self.description = Some(description);
                }
                if due_date.is_some() {
                    self.due_date = due_date;
                }
                if let Some(priority) = non_blank(patch.priority) {
                    self.priority = Some(priority);
                }
            }
            TodoChange::Complete(details) => {
                match self.status {
                    TodoStatus::Completed => {
                        return Err(CoreError::Conflict(format!(
                            "Todo with ID '{}' is already completed.",
                            self.id
                        )));
                    }
                    TodoStatus::Deleted => {
                        return Err(CoreError::Conflict(format!(
                            "Todo with ID '{}' is deleted and cannot be marked as completed.",
                            self.id
                        )));
                    }
                    TodoStatus::Active => {}
                }
                self.status = TodoStatus::Completed;
                self.completion_notes = details.completion_notes;
                self.actual_completion_date = details.actual_completion_date;
                self.time_spent_minutes = details.time_spent_minutes;
                self.satisfaction_rating = details.satisfaction_rating;
            }
            TodoChange::Reopen(details) => {
                let due_date = match parse_due_date(details.due_date) {
                    Ok(due_date) => due_date,
                    Err(err) => {
                        tracing::warn!(
                            todo_id = %self.id,
                            error = %err,
                            "Ignoring dueDate on reopen"
                        );
                        None
                    }
                };
                self.status = TodoStatus::Active;
                self.completion_notes = None;
                self.actual_completion_date = None;
                self.time_spent_minutes = None;
                self.satisfaction_rating = None;
                if details.reopen_reason.is_some() {
                    self.reopen_reason = details.reopen_reason;
                }
                if details.priority_adjustment.is_some() {
                    self.priority_adjustment = details.priority_adjustment;
                }
                if details.estimated_effort_hours.is_some() {
                    self.estimated_effort_hours = details.estimated_effort_hours;
                }
                if due_date.is_some() {
                    self.due_date = due_date;
                }
            }
        }

        self.updated_at = now;
        Ok(self)
    }
}

/// Trim-aware presence check: `None` and whitespace-only strings count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an optional `YYYY-MM-DD` due date. Blank input is treated as absent.
pub fn parse_due_date(value: Option<String>) -> Result<Option<NaiveDate>, CoreError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                CoreError::Validation(format!(
                    "Invalid dueDate '{raw}'. Expected an ISO-8601 date (YYYY-MM-DD)"
                ))
            }),
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TodoRepr<'a> {
    id: TodoId,
    #[serde(rename = "todoID")]
    todo_id: TodoId,
    title: &'a str,
    description: Option<&'a str>,
    due_date: Option<NaiveDate>,
    priority: Option<&'a str>,
    status: TodoStatus,
    completion_notes: Option<&'a Value>,
    actual_completion_date: Option<&'a Value>,
    time_spent_minutes: Option<&'a Value>,
    satisfaction_rating: Option<&'a Value>,
    reopen_reason: Option<&'a Value>,
    priority_adjustment: Option<&'a Value>,
    estimated_effort_hours: Option<&'a Value>,
    deletion_reason: Option<&'a Value>,
    deletion_comment: Option<&'a Value>,
    confirm_deletion: Option<&'a Value>,
    retain_for_days: Option<&'a Value>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Serialize for Todo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TodoRepr {
            id: self.id,
            todo_id: self.id,
            title: &self.title,
            description: self.description.as_deref(),
            due_date: self.due_date,
            priority: self.priority.as_deref(),
            status: self.status,
            completion_notes: self.completion_notes.as_ref(),
            actual_completion_date: self.actual_completion_date.as_ref(),
            time_spent_minutes: self.time_spent_minutes.as_ref(),
            satisfaction_rating: self.satisfaction_rating.as_ref(),
            reopen_reason: self.reopen_reason.as_ref(),
            priority_adjustment: self.priority_adjustment.as_ref(),
            estimated_effort_hours: self.estimated_effort_hours.as_ref(),
            deletion_reason: self.deletion_reason.as_ref(),
            deletion_comment: self.deletion_comment.as_ref(),
            confirm_deletion: self.confirm_deletion.as_ref(),
            retain_for_days: self.retain_for_days.as_ref(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
