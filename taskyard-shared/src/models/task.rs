/// Task model and database operations
///
/// Tasks are the core entity. Each task belongs to one user, carries an
/// ordered list of sub-tasks as opaque JSON, and is linked to assignee
/// contacts through the `task_assignees` join table (see
/// [`assignee`](crate::models::assignee)).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     done BOOLEAN NOT NULL DEFAULT FALSE,
///     priority VARCHAR(50) NOT NULL DEFAULT 'low',
///     status VARCHAR(50) NOT NULL DEFAULT 'todo',
///     due_date TIMESTAMP,
///     sub_tasks JSONB NOT NULL DEFAULT '[]',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Partial updates
///
/// Updates go through [`TaskPatch`]: the handler loads the row, applies the
/// patch field by field to the in-memory copy, then writes everything back
/// in a single UPDATE via [`Task::save`]. Nullable fields are tri-state
/// (`Option<Option<T>>`) so a payload can distinguish "leave alone" from
/// "clear".

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgExecutor;

/// Default priority for new tasks
pub const DEFAULT_PRIORITY: &str = "low";

/// Default status for new tasks
pub const DEFAULT_STATUS: &str = "todo";

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i32,

    /// Owning user
    pub user_id: i32,

    /// Title, never empty
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Completion flag
    pub done: bool,

    /// Free-text priority ("low", "medium", "urgent", ...)
    pub priority: String,

    /// Free-text status ("todo", "in-progress", ...)
    pub status: String,

    /// Optional due date, stored without timezone
    pub due_date: Option<NaiveDateTime>,

    /// Ordered list of sub-task objects, stored as opaque JSON
    ///
    /// Defaults to `[]`, never null.
    pub sub_tasks: JsonValue,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub user_id: i32,

    /// Title (already validated non-empty by the handler)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion flag
    pub done: bool,

    /// Priority, defaulted to [`DEFAULT_PRIORITY`] by the handler
    pub priority: String,

    /// Status, defaulted to [`DEFAULT_STATUS`] by the handler
    pub status: String,

    /// Optional due date
    pub due_date: Option<NaiveDateTime>,

    /// Sub-task list, defaulted to `[]` by the handler
    pub sub_tasks: JsonValue,
}

/// Field-by-field patch for updating a task
///
/// `None` means the key was absent from the payload and the stored value is
/// kept. For nullable columns the inner option distinguishes clearing
/// (`Some(None)`) from overwriting (`Some(Some(v))`).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title (not nullable; empty titles are rejected by the handler)
    pub title: Option<String>,

    /// New description, `Some(None)` clears it
    pub description: Option<Option<String>>,

    /// New completion flag
    pub done: Option<bool>,

    /// New priority
    pub priority: Option<String>,

    /// New status
    pub status: Option<String>,

    /// New due date, `Some(None)` clears it
    pub due_date: Option<Option<NaiveDateTime>>,

    /// New sub-task list
    pub sub_tasks: Option<JsonValue>,
}

/// Parses a due date from an ISO-8601 string
///
/// A trailing "Z" UTC marker is tolerated by stripping it, yielding a naive
/// timestamp. Any other malformed input propagates the parse error, which
/// surfaces as a server error.
pub fn parse_due_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    raw.strip_suffix('Z').unwrap_or(raw).parse::<NaiveDateTime>()
}

impl Task {
    /// Inserts a new task row
    pub async fn create(
        executor: impl PgExecutor<'_>,
        data: CreateTask,
    ) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, done, priority, status, due_date, sub_tasks)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, title, description, done, priority, status,
                      due_date, sub_tasks, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.done)
        .bind(data.priority)
        .bind(data.status)
        .bind(data.due_date)
        .bind(data.sub_tasks)
        .fetch_one(executor)
        .await?;

        Ok(task)
    }

    /// Finds a task by id, returning `None` if no row matches
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, done, priority, status,
                   due_date, sub_tasks, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, newest first
    ///
    /// No pagination and no per-user filtering.
    pub async fn list_all(executor: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, done, priority, status,
                   due_date, sub_tasks, created_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(tasks)
    }

    /// Applies a patch to the in-memory copy of this task
    ///
    /// Only fields present in the patch change; everything else keeps its
    /// stored value. Call [`Task::save`] afterwards to persist in one write.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(sub_tasks) = patch.sub_tasks {
            self.sub_tasks = sub_tasks;
        }
    }

    /// Writes all mutable columns of this task back in a single UPDATE
    pub async fn save(&self, executor: impl PgExecutor<'_>) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, done = $4, priority = $5,
                status = $6, due_date = $7, sub_tasks = $8
            WHERE id = $1
            RETURNING id, user_id, title, description, done, priority, status,
                      due_date, sub_tasks, created_at
            "#,
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.done)
        .bind(&self.priority)
        .bind(&self.status)
        .bind(self.due_date)
        .bind(&self.sub_tasks)
        .fetch_one(executor)
        .await?;

        Ok(task)
    }

    /// Deletes a task by id; join rows cascade
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(executor: impl PgExecutor<'_>, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_task() -> Task {
        Task {
            id: 1,
            user_id: 1,
            title: "Write spec".to_string(),
            description: None,
            done: false,
            priority: DEFAULT_PRIORITY.to_string(),
            status: DEFAULT_STATUS.to_string(),
            due_date: None,
            sub_tasks: json!([]),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_due_date_with_z_marker() {
        let parsed = parse_due_date("2024-05-01T10:30:00Z").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01 10:30:00");
    }

    #[test]
    fn test_parse_due_date_with_millis_and_z() {
        let parsed = parse_due_date("2024-05-01T10:30:00.000Z").unwrap();
        assert_eq!(parsed.to_string(), "2024-05-01 10:30:00");
    }

    #[test]
    fn test_parse_due_date_naive() {
        assert!(parse_due_date("2024-05-01T10:30:00").is_ok());
    }

    #[test]
    fn test_parse_due_date_malformed() {
        assert!(parse_due_date("next tuesday").is_err());
        assert!(parse_due_date("2024-05-01").is_err());
    }

    #[test]
    fn test_apply_patch_absent_fields_untouched() {
        let mut task = sample_task();
        task.apply_patch(TaskPatch::default());

        assert_eq!(task.title, "Write spec");
        assert_eq!(task.priority, "low");
        assert_eq!(task.status, "todo");
        assert!(!task.done);
    }

    #[test]
    fn test_apply_patch_overwrites_present_fields() {
        let mut task = sample_task();
        task.apply_patch(TaskPatch {
            title: Some("Ship it".to_string()),
            done: Some(true),
            status: Some("in-progress".to_string()),
            ..Default::default()
        });

        assert_eq!(task.title, "Ship it");
        assert!(task.done);
        assert_eq!(task.status, "in-progress");
        // untouched
        assert_eq!(task.priority, "low");
    }

    #[test]
    fn test_apply_patch_clears_nullable_fields() {
        let mut task = sample_task();
        task.description = Some("old".to_string());
        task.due_date = Some(parse_due_date("2024-05-01T10:30:00Z").unwrap());

        task.apply_patch(TaskPatch {
            description: Some(None),
            due_date: Some(None),
            ..Default::default()
        });

        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_apply_patch_replaces_sub_tasks() {
        let mut task = sample_task();
        task.apply_patch(TaskPatch {
            sub_tasks: Some(json!([{"title": "step 1", "done": false}])),
            ..Default::default()
        });

        assert_eq!(task.sub_tasks[0]["title"], "step 1");
    }
}
