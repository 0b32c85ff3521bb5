/// Contact endpoints
///
/// Mirrors the task endpoints: reads are public, writes require a valid
/// `X-User-Id` header, and there is no ownership enforcement beyond that.
///
/// # Endpoints
///
/// - `GET /contacts` - List all contacts, ordered by name
/// - `GET /contacts/:id` - Get a single contact
/// - `POST /contacts` - Create a contact
/// - `PUT /contacts/:id` - Partially update a contact
/// - `DELETE /contacts/:id` - Delete a contact (join rows cascade)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    views::{self, ContactView, Created, MessageResponse},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use taskyard_shared::{
    auth::header::identify,
    models::contact::{Contact, ContactPatch, CreateContact},
    patch::double_option,
};

/// Create request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    /// Name, required non-empty after trimming; missing counts as empty
    #[serde(default)]
    pub name: String,

    /// Email, required non-empty after trimming; missing counts as empty
    #[serde(default)]
    pub email: String,

    pub phone: Option<String>,

    pub company: Option<String>,

    pub position: Option<String>,

    pub avatar_color: Option<String>,
}

/// Update request body (patch semantics)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateContactRequest {
    /// New name; may not be empty when present
    pub name: Option<String>,

    /// New email; may not be empty when present
    pub email: Option<String>,

    /// Tri-state: absent keeps, null clears, value overwrites
    #[serde(deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,

    #[serde(deserialize_with = "double_option")]
    pub company: Option<Option<String>>,

    #[serde(deserialize_with = "double_option")]
    pub position: Option<Option<String>>,

    #[serde(deserialize_with = "double_option")]
    pub avatar_color: Option<Option<String>>,
}

/// List all contacts ordered by name ascending
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Vec<ContactView>>> {
    let contacts = Contact::list_all(&state.db).await?;

    let mut out = Vec::with_capacity(contacts.len());
    for contact in contacts {
        out.push(views::load_contact_view(&state.db, contact).await?);
    }

    Ok(Json(out))
}

/// Get a single contact by id
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ContactView>> {
    let contact = Contact::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

    Ok(Json(views::load_contact_view(&state.db, contact).await?))
}

/// Create a contact
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `400 Bad Request`: empty name or email
pub async fn create_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateContactRequest>,
) -> ApiResult<Created<ContactView>> {
    let current = identify(&state.db, &headers).await?;

    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::BadRequest(
            "Name and email are required".to_string(),
        ));
    }

    let contact = Contact::create(
        &state.db,
        CreateContact {
            user_id: current.user_id,
            name: name.to_string(),
            email: email.to_string(),
            phone: req.phone,
            company: req.company,
            position: req.position,
            avatar_color: req.avatar_color,
        },
    )
    .await?;

    let view = views::load_contact_view(&state.db, contact).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Partially update a contact
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown contact id
/// - `400 Bad Request`: name or email present but empty
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(req): Json<UpdateContactRequest>,
) -> ApiResult<Json<ContactView>> {
    identify(&state.db, &headers).await?;

    let name = trim_required(req.name, "Name")?;
    let email = trim_required(req.email, "Email")?;

    let mut contact = Contact::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Contact not found".to_string()))?;

    contact.apply_patch(ContactPatch {
        name,
        email,
        phone: req.phone,
        company: req.company,
        position: req.position,
        avatar_color: req.avatar_color,
    });
    let contact = contact.save(&state.db).await?;

    Ok(Json(views::load_contact_view(&state.db, contact).await?))
}

/// Delete a contact; its task assignments vanish, the tasks survive
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid `X-User-Id`
/// - `404 Not Found`: unknown contact id
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> ApiResult<Json<MessageResponse>> {
    identify(&state.db, &headers).await?;

    let deleted = Contact::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Contact not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Contact deleted")))
}

/// Validates a patch field that must stay non-empty when present
fn trim_required(value: Option<String>, field: &str) -> Result<Option<String>, ApiError> {
    match value {
        Some(raw) => {
            let trimmed = raw.trim().to_string();
            if trimmed.is_empty() {
                return Err(ApiError::BadRequest(format!(
                    "{} must not be empty",
                    field
                )));
            }
            Ok(Some(trimmed))
        }
        None => Ok(None),
    }
}
