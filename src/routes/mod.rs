//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the persistence API under `/api` plus an unauthenticated health
//! probe. Every `/api` handler takes an [`auth::AuthUser`], so requests
//! without a valid bearer token are rejected before any note query runs.

pub mod auth;
pub mod dashboard;
pub mod notes;


use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, patch};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// CORS policy: one exact origin when configured, otherwise any origin.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "invalid CORS_ORIGIN; allowing any origin");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router.
pub fn app(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/notes/{id}", patch(notes::update_note).delete(notes::delete_note))
        .route("/api/dashboard", get(dashboard::get_dashboard).patch(dashboard::update_dashboard))
        .route("/healthz", get(healthz))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
