/// Task endpoints
///
/// CRUD for tasks plus assignee management. Reads are public; writes
/// require a valid `X-User-Id` header but no ownership beyond that: any
/// authenticated caller may edit any task, and may assign any user's
/// contacts to it.
///
/// # Endpoints
///
/// - `GET /tasks` - List all tasks, newest first
/// - `GET /tasks/:id` - Get a single task
/// - `POST /tasks` - Create a task
/// - `PUT /tasks/:id` - Partially update a task
/// - `DELETE /tasks/:id` - Delete a task
///
/// # Partial updates
///
/// The update body is a patch: only keys present in the payload change the
/// stored row. `description` and `dueDate` are tri-state (absent / null /
/// value); `assignedContactIds`, when present, fully replaces the assignee
/// set (an empty list clears it).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    views::{self, Created, MessageResponse, TaskView},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use taskyard_shared::{
    auth::header::identify,
    models::{
        assignee::TaskAssignee,
        contact::Contact,
        task::{parse_due_date, CreateTask, Task, TaskPatch, DEFAULT_PRIORITY, DEFAULT_STATUS},
    },
    patch::double_option,
};

/// Create request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Title, required non-empty after trimming; a missing key counts as
    /// empty and is rejected with 400 rather than a deserialization error
    #[serde(default)]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Defaults to false
    pub done: Option<bool>,

    /// Defaults to "low"
    pub priority: Option<String>,

    /// Defaults to "todo"
    pub status: Option<String>,

    /// ISO-8601 string; a trailing "Z" is tolerated
    pub due_date: Option<String>,

    /// Defaults to []
    pub sub_tasks: Option<JsonValue>,

    /// Initial assignee set (contact ids, not filtered by owner)
    pub assigned_contact_ids: Option<Vec<i32>>,
}

/// Update request body (patch semantics)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskRequest {
    /// New title; may not be empty when present
    pub title: Option<String>,

    /// Tri-state: absent keeps, null clears, value overwrites
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    pub done: Option<bool>,

    pub priority: Option<String>,

    pub status: Option<String>,

    /// Tri-state, as an ISO-8601 string when set
    #[serde(deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,

    pub sub_tasks: Option<JsonValue>,

    /// Full replacement of the assignee set when present; [] clears it
    pub assigned_contact_ids: Option<Vec<i32>>,
}

/// List all tasks, newest first, fully serialized
///
/// No pagination and no per-user filtering.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = Task::list_all(&state.db).await?;

    let mut out = Vec::with_capacity(tasks.len());
    for task in tasks {
        out.push(views::load_task_view(&state.db, task).await?);
    }

    Ok(Json(out))
}

/// Get a single task by id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<TaskView>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(views::load_task_view(&state.db, task).await?))
}

/// Create a task
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `400 Bad Request`: empty title
pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Created<TaskView>> {
    let current = identify(&state.db, &headers).await?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    // Malformed non-Z strings propagate the parse failure
    let due_date = req.due_date.as_deref().map(parse_due_date).transpose()?;

    let mut tx = state.db.begin().await?;

    let task = Task::create(
        &mut *tx,
        CreateTask {
            user_id: current.user_id,
            title: title.to_string(),
            description: req.description,
            done: req.done.unwrap_or(false),
            priority: req.priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            status: req.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            due_date,
            sub_tasks: req.sub_tasks.unwrap_or_else(|| json!([])),
        },
    )
    .await?;

    if let Some(contact_ids) = req.assigned_contact_ids {
        let found = Contact::find_by_ids(&mut *tx, &contact_ids).await?;
        let found_ids: Vec<i32> = found.iter().map(|c| c.id).collect();
        TaskAssignee::set_for_task(&mut tx, task.id, &found_ids).await?;
    }

    tx.commit().await?;

    let view = views::load_task_view(&state.db, task).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Partially update a task
///
/// Loads the row, applies the patch field by field to the in-memory copy,
/// then persists in a single write. The assignee set, when present in the
/// payload, is resynchronized by delta in the same transaction.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown task id
/// - `400 Bad Request`: title present but empty
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    identify(&state.db, &headers).await?;

    let title = match req.title {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                return Err(ApiError::BadRequest("Title must not be empty".to_string()));
            }
            Some(trimmed)
        }
        None => None,
    };

    let due_date = match req.due_date {
        None => None,
        Some(None) => Some(None),
        Some(Some(raw)) => Some(Some(parse_due_date(&raw)?)),
    };

    let mut tx = state.db.begin().await?;

    let mut task = Task::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    task.apply_patch(TaskPatch {
        title,
        description: req.description,
        done: req.done,
        priority: req.priority,
        status: req.status,
        due_date,
        sub_tasks: req.sub_tasks,
    });
    let task = task.save(&mut *tx).await?;

    if let Some(contact_ids) = req.assigned_contact_ids {
        let found = Contact::find_by_ids(&mut *tx, &contact_ids).await?;
        let found_ids: Vec<i32> = found.iter().map(|c| c.id).collect();
        TaskAssignee::set_for_task(&mut tx, task.id, &found_ids).await?;
    }

    tx.commit().await?;

    Ok(Json(views::load_task_view(&state.db, task).await?))
}

/// Delete a task and its join rows
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown task id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    identify(&state.db, &headers).await?;

    let deleted = Task::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Task deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_tristate_due_date() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.due_date, None);

        let req: UpdateTaskRequest = serde_json::from_str(r#"{"dueDate": null}"#).unwrap();
        assert_eq!(req.due_date, Some(None));

        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"dueDate": "2024-05-01T10:30:00Z"}"#).unwrap();
        assert_eq!(req.due_date, Some(Some("2024-05-01T10:30:00Z".to_string())));
    }

    #[test]
    fn test_update_request_camel_case_keys() {
        let req: UpdateTaskRequest = serde_json::from_str(
            r#"{"assignedContactIds": [1, 2], "subTasks": [{"title": "a", "done": false}]}"#,
        )
        .unwrap();

        assert_eq!(req.assigned_contact_ids, Some(vec![1, 2]));
        assert!(req.sub_tasks.is_some());
    }

    #[test]
    fn test_update_request_empty_assignee_list_is_present() {
        // [] must be distinguishable from the key being absent: it clears
        // the assignee set rather than leaving it alone
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"assignedContactIds": []}"#).unwrap();
        assert_eq!(req.assigned_contact_ids, Some(vec![]));

        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.assigned_contact_ids, None);
    }

    #[test]
    fn test_create_request_minimal_body() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title": "Write spec"}"#).unwrap();
        assert_eq!(req.title, "Write spec");
        assert!(req.priority.is_none());
        assert!(req.status.is_none());
        assert!(req.assigned_contact_ids.is_none());
    }
}
