/// Contact model and database operations
///
/// Contacts belong to one user and can be assigned to any task through the
/// `task_assignees` join table. `updated_at` refreshes on every update
/// write.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contacts (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     phone VARCHAR(50),
///     company VARCHAR(255),
///     position VARCHAR(255),
///     avatar_color VARCHAR(20),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Contact model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    /// Unique contact id
    pub id: i32,

    /// Owning user
    pub user_id: i32,

    /// Display name, never empty
    pub name: String,

    /// Email address (no uniqueness constraint, unlike users)
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional company
    pub company: Option<String>,

    /// Optional position/role
    pub position: Option<String>,

    /// Optional avatar color (hex string picked by the client)
    pub avatar_color: Option<String>,

    /// When the contact was created
    pub created_at: DateTime<Utc>,

    /// When the contact was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContact {
    /// Owning user
    pub user_id: i32,

    /// Display name (already validated non-empty by the handler)
    pub name: String,

    /// Email address (already validated non-empty by the handler)
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional company
    pub company: Option<String>,

    /// Optional position
    pub position: Option<String>,

    /// Optional avatar color
    pub avatar_color: Option<String>,
}

/// Field-by-field patch for updating a contact
///
/// Same tri-state semantics as [`TaskPatch`](crate::models::task::TaskPatch):
/// `None` leaves the field alone, `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    /// New name (not nullable; empty names are rejected by the handler)
    pub name: Option<String>,

    /// New email (not nullable; empty emails are rejected by the handler)
    pub email: Option<String>,

    /// New phone, `Some(None)` clears it
    pub phone: Option<Option<String>>,

    /// New company, `Some(None)` clears it
    pub company: Option<Option<String>>,

    /// New position, `Some(None)` clears it
    pub position: Option<Option<String>>,

    /// New avatar color, `Some(None)` clears it
    pub avatar_color: Option<Option<String>>,
}

impl Contact {
    /// Inserts a new contact row
    pub async fn create(
        executor: impl PgExecutor<'_>,
        data: CreateContact,
    ) -> Result<Self, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (user_id, name, email, phone, company, position, avatar_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, email, phone, company, position, avatar_color,
                      created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.company)
        .bind(data.position)
        .bind(data.avatar_color)
        .fetch_one(executor)
        .await?;

        Ok(contact)
    }

    /// Finds a contact by id, returning `None` if no row matches
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, email, phone, company, position, avatar_color,
                   created_at, updated_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(contact)
    }

    /// Finds contacts by a list of ids
    ///
    /// Ids with no matching row are silently dropped; no owner filtering.
    pub async fn find_by_ids(
        executor: impl PgExecutor<'_>,
        ids: &[i32],
    ) -> Result<Vec<Self>, sqlx::Error> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, email, phone, company, position, avatar_color,
                   created_at, updated_at
            FROM contacts
            WHERE id = ANY($1)
            ORDER BY name ASC
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;

        Ok(contacts)
    }

    /// Lists all contacts ordered by name ascending
    pub async fn list_all(executor: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, user_id, name, email, phone, company, position, avatar_color,
                   created_at, updated_at
            FROM contacts
            ORDER BY name ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(contacts)
    }

    /// Applies a patch to the in-memory copy of this contact
    pub fn apply_patch(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(avatar_color) = patch.avatar_color {
            self.avatar_color = avatar_color;
        }
    }

    /// Writes all mutable columns back in a single UPDATE, refreshing
    /// `updated_at`
    pub async fn save(&self, executor: impl PgExecutor<'_>) -> Result<Self, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET name = $2, email = $3, phone = $4, company = $5, position = $6,
                avatar_color = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, name, email, phone, company, position, avatar_color,
                      created_at, updated_at
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.phone)
        .bind(&self.company)
        .bind(&self.position)
        .bind(&self.avatar_color)
        .fetch_one(executor)
        .await?;

        Ok(contact)
    }

    /// Deletes a contact by id; join rows cascade, tasks survive
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(executor: impl PgExecutor<'_>, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
