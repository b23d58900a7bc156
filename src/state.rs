//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server keeps no per-board memory: every request reads and writes Postgres
//! directly, scoped to the caller's owner id.

use canvas::doc::SizeBounds;
use sqlx::PgPool;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is cheap: the pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Size range enforced on note create and update.
    pub bounds: SizeBounds,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, bounds: SizeBounds) -> Self {
        Self { pool, bounds }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
