//! Dashboard routes: `/api/dashboard`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::auth::AuthUser;
use crate::services::dashboard::{self, DashboardError, DashboardSettings, UpdateDashboardBody};
use crate::state::AppState;

pub(crate) fn dashboard_error_to_status(err: DashboardError) -> StatusCode {
    match err {
        DashboardError::EmptyTitle => StatusCode::BAD_REQUEST,
        DashboardError::Database(e) => {
            tracing::error!(error = %e, "dashboard query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/dashboard`: settings for the caller, created on first access.
pub async fn get_dashboard(State(state): State<AppState>, auth: AuthUser) -> Result<Json<DashboardSettings>, StatusCode> {
    let settings = dashboard::get_or_create(&state.pool, &auth.owner_id)
        .await
        .map_err(dashboard_error_to_status)?;
    Ok(Json(settings))
}

/// `PATCH /api/dashboard`: rename the caller's dashboard.
pub async fn update_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateDashboardBody>,
) -> Result<Json<DashboardSettings>, StatusCode> {
    let settings = dashboard::update_title(&state.pool, &auth.owner_id, &body.title)
        .await
        .map_err(dashboard_error_to_status)?;
    Ok(Json(settings))
}
