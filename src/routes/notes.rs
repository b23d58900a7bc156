//! Note routes: `/api/notes` and `/api/notes/{id}`.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use canvas::doc::{Note, NotePatch};
use uuid::Uuid;

use super::auth::AuthUser;
use crate::services::note::{self, CreateNoteBody, NoteError};
use crate::state::AppState;

pub(crate) fn note_error_to_status(err: NoteError) -> StatusCode {
    match err {
        NoteError::NotFound(_) => StatusCode::NOT_FOUND,
        NoteError::Database(e) => {
            tracing::error!(error = %e, "note query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/notes`: every note owned by the caller.
pub async fn list_notes(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Note>>, StatusCode> {
    let notes = note::list_notes(&state.pool, &auth.owner_id)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(notes))
}

/// `POST /api/notes`: create a note with defaults for missing fields.
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateNoteBody>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    let draft = note::resolve_create(body, state.bounds);
    let created = note::create_note(&state.pool, &auth.owner_id, &draft)
        .await
        .map_err(note_error_to_status)?;
    tracing::info!(owner_id = %auth.owner_id, id = %created.id, "note created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/notes/{id}`: partial update; size is clamped.
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<NotePatch>,
) -> Result<Json<Note>, StatusCode> {
    let patch = note::clamp_patch(patch, state.bounds);
    let updated = note::update_note(&state.pool, &auth.owner_id, id, &patch)
        .await
        .map_err(note_error_to_status)?;
    Ok(Json(updated))
}

/// `DELETE /api/notes/{id}`.
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    note::delete_note(&state.pool, &auth.owner_id, id)
        .await
        .map_err(note_error_to_status)?;
    tracing::info!(owner_id = %auth.owner_id, %id, "note deleted");
    Ok(Json(serde_json::json!({ "message": "Note deleted successfully" })))
}
