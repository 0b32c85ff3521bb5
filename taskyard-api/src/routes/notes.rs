/// Note endpoints
///
/// Same pattern as tasks and contacts: public reads, `X-User-Id` writes,
/// no ownership enforcement.
///
/// # Endpoints
///
/// - `GET /notes` - List all notes, newest first
/// - `GET /notes/:id` - Get a single note
/// - `POST /notes` - Create a note
/// - `PUT /notes/:id` - Partially update a note
/// - `DELETE /notes/:id` - Delete a note

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    views::{self, Created, MessageResponse, NoteView},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use taskyard_shared::{
    auth::header::identify,
    models::note::{CreateNote, Note, NotePatch},
};

/// Create request body
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Title, required non-empty after trimming; missing counts as empty
    #[serde(default)]
    pub title: String,

    /// Content body, required non-empty after trimming; missing counts as empty
    #[serde(default)]
    pub content: String,
}

/// Update request body (patch semantics; both columns non-nullable)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateNoteRequest {
    /// New title; may not be empty when present
    pub title: Option<String>,

    /// New content; may not be empty when present
    pub content: Option<String>,
}

/// List all notes, newest first
pub async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteView>>> {
    let notes = Note::list_all(&state.db).await?;

    let mut out = Vec::with_capacity(notes.len());
    for note in notes {
        out.push(views::load_note_view(&state.db, note).await?);
    }

    Ok(Json(out))
}

/// Get a single note by id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<NoteView>> {
    let note = Note::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(views::load_note_view(&state.db, note).await?))
}

/// Create a note
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `400 Bad Request`: empty title or content
pub async fn create_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<Created<NoteView>> {
    let current = identify(&state.db, &headers).await?;

    let title = req.title.trim();
    let content = req.content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(ApiError::BadRequest(
            "Title and content are required".to_string(),
        ));
    }

    let note = Note::create(
        &state.db,
        CreateNote {
            user_id: current.user_id,
            title: title.to_string(),
            content: content.to_string(),
        },
    )
    .await?;

    let view = views::load_note_view(&state.db, note).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Partially update a note
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown note id
/// - `400 Bad Request`: title or content present but empty
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteView>> {
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
    let content = match req.content {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                return Err(ApiError::BadRequest(
                    "Content must not be empty".to_string(),
                ));
            }
            Some(trimmed)
        }
        None => None,
    };

    let mut note = Note::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    note.apply_patch(NotePatch { title, content });
    let note = note.save(&state.db).await?;

    Ok(Json(views::load_note_view(&state.db, note).await?))
}

/// Delete a note
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown note id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    identify(&state.db, &headers).await?;

    let deleted = Note::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Note deleted")))
}
