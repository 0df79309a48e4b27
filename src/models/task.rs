use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional due date, accepted as an RFC 3339 / ISO 8601 timestamp.
    pub due_date: Option<DateTime<Utc>>,

    /// The initial status of the task. Defaults to `todo` when omitted.
    pub status: Option<TaskStatus>,
}

/// Partial update for a task. Fields absent from the patch are left unchanged.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// A provided due date replaces the stored value.
    pub due_date: Option<DateTime<Utc>>,

    pub status: Option<TaskStatus>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Optional due date for the task.
    pub due_date: Option<DateTime<Utc>>,
    /// Identifier of the user who owns the task. Immutable after creation.
    pub user_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskQuery {
    /// 1-based page number. Defaults to 1.
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    /// Page size. Defaults to 10.
    #[validate(range(min = 1))]
    pub limit: Option<i64>,
    /// Filter tasks by status.
    pub status: Option<TaskStatus>,
}

/// A page of tasks plus the total count matching the filter, ignoring pagination.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
