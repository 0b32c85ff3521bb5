/// Response serialization
///
/// Pure mappings from persisted rows (plus their relations) to the JSON
/// wire shape, plus small loaders that fetch the relations. Wire field
/// names are camelCase; timestamps serialize as ISO-8601 strings (null when
/// absent); list-typed fields never serialize as null.

use axum::http::StatusCode;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use taskyard_shared::models::{
    assignee::TaskAssignee, contact::Contact, note::Note, task::Task, user::User,
};

/// Public subset of a user: `{id, name, email}`
///
/// Used both as the auth response body and as the nested owner object on
/// tasks, contacts, and notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Nested assignee object on a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub avatar_color: Option<String>,
}

impl From<&Contact> for ContactSummary {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            email: contact.email.clone(),
            avatar_color: contact.avatar_color.clone(),
        }
    }
}

/// Fully serialized task, including owner and assignees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    pub priority: String,
    pub status: String,
    pub due_date: Option<NaiveDateTime>,
    pub sub_tasks: JsonValue,
    pub created_at: DateTime<Utc>,
    pub assigned_contact_ids: Vec<i32>,
    pub assigned_contacts: Vec<ContactSummary>,
    pub user: Option<UserSummary>,
}

impl TaskView {
    /// Reshapes a task row, its owner, and its assignee contacts into the
    /// wire form
    pub fn from_parts(task: Task, owner: Option<User>, assignees: Vec<Contact>) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            done: task.done,
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            sub_tasks: task.sub_tasks,
            created_at: task.created_at,
            assigned_contact_ids: assignees.iter().map(|c| c.id).collect(),
            assigned_contacts: assignees.iter().map(ContactSummary::from).collect(),
            user: owner.map(UserSummary::from),
        }
    }
}

/// Fully serialized contact, including owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub avatar_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Option<UserSummary>,
}

impl ContactView {
    /// Reshapes a contact row and its owner into the wire form
    pub fn from_parts(contact: Contact, owner: Option<User>) -> Self {
        Self {
            id: contact.id,
            user_id: contact.user_id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            company: contact.company,
            position: contact.position,
            avatar_color: contact.avatar_color,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            user: owner.map(UserSummary::from),
        }
    }
}

/// Fully serialized note, including owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: Option<UserSummary>,
}

impl NoteView {
    /// Reshapes a note row and its owner into the wire form
    pub fn from_parts(note: Note, owner: Option<User>) -> Self {
        Self {
            id: note.id,
            user_id: note.user_id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
            user: owner.map(UserSummary::from),
        }
    }
}

/// Simple `{message}` body for delete confirmations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Loads the relations of a task and assembles its view
pub async fn load_task_view(pool: &PgPool, task: Task) -> Result<TaskView, sqlx::Error> {
    let owner = User::find_by_id(pool, task.user_id).await?;

    let contact_ids = TaskAssignee::contact_ids_for_task(pool, task.id).await?;
    let assignees = if contact_ids.is_empty() {
        Vec::new()
    } else {
        Contact::find_by_ids(pool, &contact_ids).await?
    };

    Ok(TaskView::from_parts(task, owner, assignees))
}

/// Loads the owner of a contact and assembles its view
pub async fn load_contact_view(pool: &PgPool, contact: Contact) -> Result<ContactView, sqlx::Error> {
    let owner = User::find_by_id(pool, contact.user_id).await?;
    Ok(ContactView::from_parts(contact, owner))
}

/// Loads the owner of a note and assembles its view
pub async fn load_note_view(pool: &PgPool, note: Note) -> Result<NoteView, sqlx::Error> {
    let owner = User::find_by_id(pool, note.user_id).await?;
    Ok(NoteView::from_parts(note, owner))
}

/// Convenience: the `(StatusCode, Json)` pair handlers return on create
pub type Created<T> = (StatusCode, axum::Json<T>);
