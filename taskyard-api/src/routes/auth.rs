/// Authentication endpoints
///
/// Registration and login. No session or token is issued: login returns the
/// public user fields and the client is expected to remember the id and
/// supply it via `X-User-Id` on subsequent write requests.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login` - Verify credentials

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    views::{Created, UserSummary},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskyard_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Email address. Only presence is checked, not syntax; uniqueness is
    /// enforced by the database.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Plaintext password (hashed before storage)
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    /// Plaintext password
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Flattens validator errors into a single human-readable message
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "name": "John Doe", "email": "user@example.com", "password": "secret" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or empty fields
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Created<UserSummary>> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(validation_message(&e)))?;

    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::BadRequest(
            "Name and email must not be empty".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)?;

    // Duplicate emails surface as a unique-constraint violation → 409
    let user = User::create(
        &state.db,
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserSummary::from(user))))
}

/// Login
///
/// Verifies email existence and password hash match.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "secret" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing fields
/// - `401 Unauthorized`: unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<UserSummary>> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(validation_message(&e)))?;

    let user = User::find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    Ok(Json(UserSummary::from(user)))
}
