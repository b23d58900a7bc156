//! Wire DTOs for the persistence API.
//!
//! DESIGN
//! ======
//! Notes, drafts and patches are shared with the engine and live in
//! `canvas::doc`; they are re-exported here so callers have one import path
//! for the whole API schema. Everything is camelCase JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use canvas::doc::{Note, NoteDraft, NoteId, NotePatch, Position, Size};

/// Title shown for a dashboard that has never been renamed.
pub const DEFAULT_DASHBOARD_TITLE: &str = "Sticky Notes Dashboard";

/// Per-user dashboard settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    /// Owning user. One settings row per user.
    pub owner_id: String,
    /// Dashboard heading.
    pub title: String,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Body of `PATCH /api/dashboard`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardUpdate {
    pub title: String,
}

/// Body returned by `DELETE /api/notes/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
