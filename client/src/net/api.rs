//! REST client for the persistence API.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves a bearer token first, so a missing token fails with
//! [`ApiError::Auth`] before anything reaches the network. Non-2xx responses
//! are classified by status so the sync layer can treat `404` on delete as
//! "already gone" while rolling back other failures.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{DashboardSettings, DashboardUpdate, DeleteResponse, Note, NoteDraft, NoteId, NotePatch};

/// Base URL used when the host does not supply one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Errors produced by API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable bearer token, or the server rejected it.
    #[error("not authenticated: {0}")]
    Auth(String),

    /// The note or resource does not exist for this user.
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether the error means the target is already absent on the server.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Classify a non-success response.
pub(crate) fn error_for_status(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Auth(if body.is_empty() { "token rejected".to_owned() } else { body.to_owned() }),
        404 => ApiError::NotFound,
        _ => ApiError::Http { status, message: body.to_owned() },
    }
}

pub(crate) fn notes_endpoint(base_url: &str) -> String {
    format!("{base_url}/notes")
}

pub(crate) fn note_endpoint(base_url: &str, id: &NoteId) -> String {
    format!("{base_url}/notes/{id}")
}

pub(crate) fn dashboard_endpoint(base_url: &str) -> String {
    format!("{base_url}/dashboard")
}

// =============================================================================
// AUTH
// =============================================================================

/// Source of the current user's bearer token.
#[async_trait(?Send)]
pub trait TokenProvider {
    /// Return the current token or fail with [`ApiError::Auth`].
    async fn token(&self) -> Result<String, ApiError>;
}

/// A fixed token, for tests and command-line hosts.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

#[async_trait(?Send)]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String, ApiError> {
        if self.0.trim().is_empty() {
            return Err(ApiError::Auth("no session token".to_owned()));
        }
        Ok(self.0.clone())
    }
}

// =============================================================================
// API SURFACE
// =============================================================================

/// Operations the board needs from the persistence layer.
#[async_trait(?Send)]
pub trait BoardApi {
    /// All notes owned by the caller, in stacking order.
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;
    /// Create a note. The server assigns id, owner and timestamps.
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError>;
    /// Apply a partial update and return the stored note.
    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note, ApiError>;
    async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError>;
    /// The caller's dashboard settings, created on first access.
    async fn get_dashboard(&self) -> Result<DashboardSettings, ApiError>;
    async fn update_dashboard(&self, title: &str) -> Result<DashboardSettings, ApiError>;
}

/// HTTP implementation of [`BoardApi`].
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient<T> {
    http: reqwest::Client,
    base_url: String,
    tokens: T,
}

impl<T: TokenProvider> ApiClient<T> {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/api`).
    #[must_use]
    pub fn new(base_url: &str, tokens: T) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned(), tokens }
    }

    /// Create a client for [`DEFAULT_API_BASE_URL`].
    #[must_use]
    pub fn with_default_url(tokens: T) -> Self {
        Self::new(DEFAULT_API_BASE_URL, tokens)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let token = self.tokens.token().await?;
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status.as_u16(), &body));
        }
        Ok(response.text().await?)
    }

    async fn send_json<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<R, ApiError> {
        let text = self.send(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_body<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(request.json(body)).await
    }
}

#[async_trait(?Send)]
impl<T: TokenProvider> BoardApi for ApiClient<T> {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.send_json(self.http.get(notes_endpoint(&self.base_url))).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.send_body(self.http.post(notes_endpoint(&self.base_url)), draft).await
    }

    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note, ApiError> {
        self.send_body(self.http.patch(note_endpoint(&self.base_url, id)), patch).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError> {
        let resp: DeleteResponse = self.send_json(self.http.delete(note_endpoint(&self.base_url, id))).await?;
        tracing::debug!(%id, message = %resp.message, "note deleted");
        Ok(())
    }

    async fn get_dashboard(&self) -> Result<DashboardSettings, ApiError> {
        self.send_json(self.http.get(dashboard_endpoint(&self.base_url))).await
    }

    async fn update_dashboard(&self, title: &str) -> Result<DashboardSettings, ApiError> {
        let body = DashboardUpdate { title: title.to_owned() };
        self.send_body(self.http.patch(dashboard_endpoint(&self.base_url)), &body).await
    }
}
