//! Note service: owner-scoped CRUD over the `notes` table.
//!
//! DESIGN
//! ======
//! Every query filters on `owner_id`, so a note owned by someone else is
//! indistinguishable from a missing one. Sizes are clamped to the configured
//! bounds before they reach the database; out-of-range writes are never
//! rejected.
//!
//! Partial updates are a single `UPDATE` where each column keeps its value
//! when the matching bind is `NULL`. An empty title or emoji clears the column.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::time::{SystemTime, UNIX_EPOCH};

use canvas::consts::DEFAULT_NOTE_CONTENT;
use canvas::doc::{Note, NoteDraft, NoteId, NotePatch, Position, Size, SizeBounds};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Side length of a note created without an explicit size.
pub const SERVER_DEFAULT_SIZE: f64 = 200.0;
const SERVER_DEFAULT_COLOR: &str = "#fef3c7";

/// Body of `POST /api/notes`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteBody {
    pub content: Option<String>,
    pub title: Option<String>,
    pub emoji: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub background_color: Option<String>,
    pub z_index: Option<i64>,
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    owner_id: String,
    content: String,
    title: Option<String>,
    emoji: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    background_color: String,
    z_index: i64,
    created_at: i64,
    updated_at: i64,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            title: row.title,
            emoji: row.emoji,
            position: Position { x: row.x, y: row.y },
            size: Size { width: row.width, height: row.height },
            background_color: row.background_color,
            z_index: row.z_index,
            owner_id: row.owner_id,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

const NOTE_COLUMNS: &str =
    "id, owner_id, content, title, emoji, x, y, width, height, background_color, z_index, created_at, updated_at";

// =============================================================================
// VALIDATION
// =============================================================================

/// Fill defaults for a create request and clamp its size.
#[must_use]
pub fn resolve_create(body: CreateNoteBody, bounds: SizeBounds) -> NoteDraft {
    let size = body.size.unwrap_or(Size { width: SERVER_DEFAULT_SIZE, height: SERVER_DEFAULT_SIZE });
    NoteDraft {
        content: body.content.unwrap_or_else(|| DEFAULT_NOTE_CONTENT.to_owned()),
        title: body.title.filter(|t| !t.is_empty()),
        emoji: body.emoji.filter(|e| !e.is_empty()),
        position: body.position.unwrap_or_default(),
        size: bounds.clamp_size(size),
        background_color: body.background_color.unwrap_or_else(|| SERVER_DEFAULT_COLOR.to_owned()),
        z_index: body.z_index.unwrap_or(0),
    }
}

/// Clamp the size carried by a patch, if any.
#[must_use]
pub fn clamp_patch(mut patch: NotePatch, bounds: SizeBounds) -> NotePatch {
    patch.size = patch.size.map(|s| bounds.clamp_size(s));
    patch
}

pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

// =============================================================================
// CRUD
// =============================================================================

/// All notes owned by `owner_id`, bottom of the stack first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_notes(pool: &PgPool, owner_id: &str) -> Result<Vec<Note>, NoteError> {
    let rows: Vec<NoteRow> = sqlx::query_as(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE owner_id = $1 ORDER BY z_index, created_at, id"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Note::from).collect())
}

/// Insert a resolved draft for `owner_id`.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_note(pool: &PgPool, owner_id: &str, draft: &NoteDraft) -> Result<Note, NoteError> {
    let now = now_ms();
    let row: NoteRow = sqlx::query_as(&format!(
        "INSERT INTO notes (id, owner_id, content, title, emoji, x, y, width, height, background_color, z_index, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&draft.content)
    .bind(draft.title.as_deref())
    .bind(draft.emoji.as_deref())
    .bind(draft.position.x)
    .bind(draft.position.y)
    .bind(draft.size.width)
    .bind(draft.size.height)
    .bind(&draft.background_color)
    .bind(draft.z_index)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// Apply a partial update to a note owned by `owner_id`.
///
/// # Errors
///
/// Returns `NotFound` if no such note belongs to the owner, or a database error.
pub async fn update_note(pool: &PgPool, owner_id: &str, id: NoteId, patch: &NotePatch) -> Result<Note, NoteError> {
    let row: Option<NoteRow> = sqlx::query_as(&format!(
        "UPDATE notes SET
             content = COALESCE($3, content),
             title = CASE WHEN $4::text IS NULL THEN title ELSE NULLIF($4, '') END,
             emoji = CASE WHEN $5::text IS NULL THEN emoji ELSE NULLIF($5, '') END,
             x = COALESCE($6, x),
             y = COALESCE($7, y),
             width = COALESCE($8, width),
             height = COALESCE($9, height),
             background_color = COALESCE($10, background_color),
             z_index = COALESCE($11, z_index),
             updated_at = $12
         WHERE id = $1 AND owner_id = $2
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(id)
    .bind(owner_id)
    .bind(patch.content.as_deref())
    .bind(patch.title.as_deref())
    .bind(patch.emoji.as_deref())
    .bind(patch.position.map(|p| p.x))
    .bind(patch.position.map(|p| p.y))
    .bind(patch.size.map(|s| s.width))
    .bind(patch.size.map(|s| s.height))
    .bind(patch.background_color.as_deref())
    .bind(patch.z_index)
    .bind(now_ms())
    .fetch_optional(pool)
    .await?;
    row.map(Note::from).ok_or(NoteError::NotFound(id))
}

/// Delete a note owned by `owner_id`.
///
/// # Errors
///
/// Returns `NotFound` if no such note belongs to the owner, or a database error.
pub async fn delete_note(pool: &PgPool, owner_id: &str, id: NoteId) -> Result<(), NoteError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(NoteError::NotFound(id));
    }
    Ok(())
}
