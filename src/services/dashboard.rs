//! Dashboard settings service: one row per owner, created on first access.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::note::now_ms;

pub const DEFAULT_DASHBOARD_TITLE: &str = "Sticky Notes Dashboard";

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Per-owner dashboard settings, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    pub owner_id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Body of `PATCH /api/dashboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDashboardBody {
    pub title: String,
}

/// Trim a requested title, rejecting blank ones.
///
/// # Errors
///
/// Returns `EmptyTitle` if nothing is left after trimming.
pub fn normalize_title(raw: &str) -> Result<String, DashboardError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DashboardError::EmptyTitle);
    }
    Ok(title.to_owned())
}

/// Return the owner's settings, inserting the defaults on first access.
///
/// # Errors
///
/// Returns a database error if the upsert fails.
pub async fn get_or_create(pool: &PgPool, owner_id: &str) -> Result<DashboardSettings, DashboardError> {
    let now = now_ms();
    // The no-op update makes RETURNING yield the existing row on conflict.
    let settings = sqlx::query_as(
        "INSERT INTO dashboard_settings (owner_id, title, created_at, updated_at)
         VALUES ($1, $2, $3, $3)
         ON CONFLICT (owner_id) DO UPDATE SET owner_id = EXCLUDED.owner_id
         RETURNING owner_id, title, created_at, updated_at",
    )
    .bind(owner_id)
    .bind(DEFAULT_DASHBOARD_TITLE)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(settings)
}

/// Set the owner's dashboard title, creating the row if needed.
///
/// # Errors
///
/// Returns `EmptyTitle` for a blank title, or a database error.
pub async fn update_title(pool: &PgPool, owner_id: &str, raw_title: &str) -> Result<DashboardSettings, DashboardError> {
    let title = normalize_title(raw_title)?;
    let now = now_ms();
    let settings = sqlx::query_as(
        "INSERT INTO dashboard_settings (owner_id, title, created_at, updated_at)
         VALUES ($1, $2, $3, $3)
         ON CONFLICT (owner_id) DO UPDATE SET title = EXCLUDED.title, updated_at = EXCLUDED.updated_at
         RETURNING owner_id, title, created_at, updated_at",
    )
    .bind(owner_id)
    .bind(&title)
    .bind(now)
    .fetch_one(pool)
    .await?;
    tracing::info!(%owner_id, %title, "dashboard renamed");
    Ok(settings)
}
