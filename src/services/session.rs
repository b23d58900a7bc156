//! Bearer-token session lookup.
//!
//! ARCHITECTURE
//! ============
//! Sessions are issued by the external auth provider, which writes rows into
//! the `sessions` table. This service only resolves a token to its owner id.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use sqlx::PgPool;

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
#[must_use]
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// Resolve a token to the owning user id, ignoring expired sessions.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = $1 AND expires_at > now()")
        .bind(token)
        .fetch_optional(pool)
        .await
}
