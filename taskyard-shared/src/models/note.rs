/// Note model and database operations
///
/// Notes are the simplest entity: a title and a content body owned by one
/// user. `updated_at` refreshes on every update write.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notes (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Note model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Unique note id
    pub id: i32,

    /// Owning user
    pub user_id: i32,

    /// Title, never empty
    pub title: String,

    /// Content body, never empty
    pub content: String,

    /// When the note was created
    pub created_at: DateTime<Utc>,

    /// When the note was last modified
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Owning user
    pub user_id: i32,

    /// Title (already validated non-empty by the handler)
    pub title: String,

    /// Content body (already validated non-empty by the handler)
    pub content: String,
}

/// Field-by-field patch for updating a note
///
/// Both columns are non-nullable, so a plain `Option` per field suffices:
/// `None` means the key was absent.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    /// New title
    pub title: Option<String>,

    /// New content
    pub content: Option<String>,
}

impl Note {
    /// Inserts a new note row
    pub async fn create(
        executor: impl PgExecutor<'_>,
        data: CreateNote,
    ) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(executor)
        .await?;

        Ok(note)
    }

    /// Finds a note by id, returning `None` if no row matches
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: i32,
    ) -> Result<Option<Self>, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(note)
    }

    /// Lists all notes, newest first
    pub async fn list_all(executor: impl PgExecutor<'_>) -> Result<Vec<Self>, sqlx::Error> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at
            FROM notes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(notes)
    }

    /// Applies a patch to the in-memory copy of this note
    pub fn apply_patch(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }

    /// Writes the mutable columns back in a single UPDATE, refreshing
    /// `updated_at`
    pub async fn save(&self, executor: impl PgExecutor<'_>) -> Result<Self, sqlx::Error> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.content)
        .fetch_one(executor)
        .await?;

        Ok(note)
    }

    /// Deletes a note by id
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(executor: impl PgExecutor<'_>, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
