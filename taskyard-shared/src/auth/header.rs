/// `X-User-Id` header identification
///
/// The auth stub: write endpoints require the client to send its own user id
/// in the `X-User-Id` header. The id is parsed and checked against the users
/// table; there is no session, token, or signature. Missing, unparseable, or
/// unknown ids are rejected as unauthorized.
///
/// There is deliberately no ownership check downstream of this: any valid
/// user id may edit any task, contact, or note.
///
/// # Example
///
/// ```no_run
/// use axum::http::HeaderMap;
/// use sqlx::PgPool;
/// use taskyard_shared::auth::header::identify;
///
/// # async fn example(pool: PgPool, headers: HeaderMap) -> anyhow::Result<()> {
/// let current = identify(&pool, &headers).await?;
/// println!("Request from user {}", current.user_id);
/// # Ok(())
/// # }
/// ```

use axum::http::HeaderMap;
use sqlx::PgPool;

use crate::models::user::User;

/// Header carrying the caller's user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identification context for a write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// Id of the user row the header named
    pub user_id: i32,
}

/// Error type for header identification
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `X-User-Id` header on the request
    #[error("Missing X-User-Id header")]
    MissingHeader,

    /// Header present but not an integer id
    #[error("Invalid X-User-Id header: {0}")]
    InvalidHeader(String),

    /// Header named a user id that does not exist
    #[error("Unknown user id {0}")]
    UnknownUser(i32),

    /// Lookup failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolves the `X-User-Id` header to a known user
///
/// # Errors
///
/// - `AuthError::MissingHeader` if the header is absent
/// - `AuthError::InvalidHeader` if it is not an integer
/// - `AuthError::UnknownUser` if no user row has that id
pub async fn identify(pool: &PgPool, headers: &HeaderMap) -> Result<CurrentUser, AuthError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("not valid ASCII".to_string()))?;

    let user_id: i32 = raw
        .trim()
        .parse()
        .map_err(|_| AuthError::InvalidHeader(raw.to_string()))?;

    User::find_by_id(pool, user_id)
        .await?
        .ok_or(AuthError::UnknownUser(user_id))?;

    Ok(CurrentUser { user_id })
}
