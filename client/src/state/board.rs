//! Synchronisation between the engine's note collection and the remote store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine applies edits locally and reports them as [`Action`]s. This
//! module persists those edits through a [`BoardApi`] and reconciles the local
//! collection with each response.
//!
//! DESIGN
//! ======
//! Updates are optimistic and two-phase. [`BoardSync::begin_update`] captures
//! the touched fields and applies the patch, then [`BoardSync::settle_update`]
//! either merges server-computed fields or restores the captured fields that
//! no later write has changed.
//! Creates and deletes are not optimistic: a note appears once the server has
//! assigned its id and disappears once the server confirms removal.
//!
//! CONCURRENCY
//! ===========
//! The API sits behind a shared `Rc` handle. [`BoardSync::prepare`] turns
//! actions into a [`Batch`] that owns its own handle, so the requests run
//! without borrowing the board. All requests of a batch are in flight at once
//! and settle in any order through [`BoardSync::finish`]. A host that keeps
//! the board in a `RefCell` borrows it only for `prepare` and `finish`, and
//! keeps feeding input events to the engine while a batch runs.
//!
//! ERROR HANDLING
//! ==============
//! Failures are per operation and never fatal to the board, except a failed
//! initial load. Every failure is logged and returned to the caller.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::rc::Rc;

use canvas::engine::{Action, EngineCore};
use futures::future::join_all;

use crate::net::api::{ApiError, BoardApi};
use crate::net::types::{Note, NoteDraft, NoteId, NotePatch};

/// Lifecycle of the initial fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The fetch failed; the board cannot be shown.
    Failed(String),
}

/// An update that has been applied locally but not yet confirmed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingUpdate {
    pub id: NoteId,
    pub patch: NotePatch,
    /// Fields touched by `patch` as they were before the local apply.
    pub previous: NotePatch,
}

/// A remote operation taken from an engine action.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Update(PendingUpdate),
    Create(NoteDraft),
    Delete(NoteId),
}

/// A request paired with the server's answer.
#[derive(Debug)]
pub enum Response {
    Update(PendingUpdate, Result<Note, ApiError>),
    Create(Result<Note, ApiError>),
    Delete(NoteId, Result<(), ApiError>),
}

impl Request {
    /// Send the request. Only the API is borrowed.
    pub async fn send<A: BoardApi + ?Sized>(self, api: &A) -> Response {
        match self {
            Self::Update(pending) => {
                let result = api.update_note(&pending.id, &pending.patch).await;
                Response::Update(pending, result)
            }
            Self::Create(draft) => Response::Create(api.create_note(&draft).await),
            Self::Delete(id) => {
                let result = api.delete_note(&id).await;
                Response::Delete(id, result)
            }
        }
    }
}

/// Requests split off the board by [`BoardSync::prepare`].
pub struct Batch<A> {
    api: Rc<A>,
    requests: Vec<Request>,
    forwarded: Vec<Action>,
}

impl<A: BoardApi> Batch<A> {
    #[must_use]
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Send every request at once and wait for all answers.
    pub async fn run(self) -> Completed {
        let Self { api, requests, forwarded } = self;
        let api: &A = &api;
        let responses = join_all(requests.into_iter().map(|request| request.send(api))).await;
        Completed { responses, forwarded }
    }
}

/// Answers for a [`Batch`], ready for [`BoardSync::finish`].
#[derive(Debug)]
pub struct Completed {
    pub responses: Vec<Response>,
    pub forwarded: Vec<Action>,
}

/// Outcome of [`BoardSync::dispatch`].
#[derive(Debug, Default)]
pub struct Dispatched {
    /// Actions for the host to handle (cursor, redraw, text editing).
    pub forwarded: Vec<Action>,
    /// Remote operations that failed.
    pub failures: Vec<ApiError>,
}

/// Owns the engine and a handle to the API and keeps them consistent.
pub struct BoardSync<A> {
    engine: EngineCore,
    api: Rc<A>,
    status: LoadStatus,
}

impl<A: BoardApi> BoardSync<A> {
    #[must_use]
    pub fn new(engine: EngineCore, api: A) -> Self {
        Self::with_shared_api(engine, Rc::new(api))
    }

    /// Build a board around an API handle the host also holds.
    #[must_use]
    pub fn with_shared_api(engine: EngineCore, api: Rc<A>) -> Self {
        Self { engine, api, status: LoadStatus::Idle }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// A handle for sending requests without borrowing the board.
    #[must_use]
    pub fn api_handle(&self) -> Rc<A> {
        Rc::clone(&self.api)
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    // =========================================================================
    // LOAD / CREATE
    // =========================================================================

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Replace the local collection with the fetched notes.
    ///
    /// # Errors
    ///
    /// Passes the API error through; the status becomes [`LoadStatus::Failed`].
    pub fn settle_load(&mut self, result: Result<Vec<Note>, ApiError>) -> Result<usize, ApiError> {
        match result {
            Ok(notes) => {
                let count = notes.len();
                self.engine.load_snapshot(notes);
                self.status = LoadStatus::Ready;
                tracing::info!(count, "board loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "board load failed");
                self.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch every note the caller owns and replace the local collection.
    ///
    /// # Errors
    ///
    /// Returns the API error; the status becomes [`LoadStatus::Failed`].
    pub async fn load(&mut self) -> Result<usize, ApiError> {
        self.begin_load();
        let api = self.api_handle();
        let result = api.list_notes().await;
        self.settle_load(result)
    }

    /// Insert the server's copy of a created note.
    ///
    /// # Errors
    ///
    /// Passes the API error through; nothing is inserted.
    pub fn settle_create(&mut self, result: Result<Note, ApiError>) -> Result<NoteId, ApiError> {
        match result {
            Ok(note) => {
                let id = note.id;
                self.engine.apply_create(note);
                tracing::debug!(%id, "note created");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "note create failed");
                Err(e)
            }
        }
    }

    /// Create a note remotely and insert the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the API error; nothing is inserted.
    pub async fn create(&mut self, draft: &NoteDraft) -> Result<NoteId, ApiError> {
        let api = self.api_handle();
        let result = api.create_note(draft).await;
        self.settle_create(result)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Apply `patch` locally and capture what it replaced.
    ///
    /// Returns `None` if the note is not in the local collection.
    pub fn begin_update(&mut self, id: NoteId, patch: NotePatch) -> Option<PendingUpdate> {
        let previous = self.engine.apply_local(&id, &patch)?;
        Some(PendingUpdate { id, patch, previous })
    }

    /// Reconcile a pending update with the server's answer.
    ///
    /// On success the server's timestamps are merged, plus the size when the
    /// patch touched it and no later write has resized the note. On failure
    /// the captured fields are restored where the note still holds what the
    /// patch wrote. Either way a note that has since disappeared is left alone.
    ///
    /// # Errors
    ///
    /// Passes the API error through after rolling back.
    pub fn settle_update(&mut self, pending: PendingUpdate, result: Result<Note, ApiError>) -> Result<(), ApiError> {
        let PendingUpdate { id, patch, previous } = pending;
        match result {
            Ok(server) => {
                if let Some(size) = patch.size {
                    let written = self.engine.doc.bounds().clamp_size(size);
                    if self.engine.note(&id).is_some_and(|note| note.size == written) {
                        self.engine.apply_update(&id, &NotePatch::size(server.size));
                    }
                }
                self.engine.doc.stamp(&id, server.created_at, server.updated_at);
                Ok(())
            }
            Err(e) => {
                let restored = self.engine.revert_local(&id, &patch, &previous);
                tracing::warn!(%id, restored, error = %e, "note update failed; rolled back");
                Err(e)
            }
        }
    }

    /// Send an already-applied update and settle it.
    ///
    /// # Errors
    ///
    /// Returns the API error after rolling back.
    pub async fn persist(&mut self, pending: PendingUpdate) -> Result<(), ApiError> {
        let api = self.api_handle();
        let response = Request::Update(pending).send(api.as_ref()).await;
        self.settle(response)
    }

    /// Optimistically update a note and persist it.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] without a request if the note is not loaded;
    /// otherwise the API error after rolling back.
    pub async fn update(&mut self, id: NoteId, patch: NotePatch) -> Result<(), ApiError> {
        let Some(pending) = self.begin_update(id, patch) else {
            tracing::debug!(%id, "update for unknown note ignored");
            return Err(ApiError::NotFound);
        };
        self.persist(pending).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Remove a note locally once the server has answered its delete.
    ///
    /// A `404` means the note is already gone and it is removed locally too.
    ///
    /// # Errors
    ///
    /// Any other API error; the note stays.
    pub fn settle_delete(&mut self, id: NoteId, result: Result<(), ApiError>) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                self.engine.apply_delete(&id);
                Ok(())
            }
            Err(ApiError::NotFound) => {
                tracing::warn!(%id, "note already deleted on server; removing locally");
                self.engine.apply_delete(&id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "note delete failed");
                Err(e)
            }
        }
    }

    /// Delete a note remotely, then locally.
    ///
    /// # Errors
    ///
    /// Any API error other than `404`; the note stays.
    pub async fn delete(&mut self, id: NoteId) -> Result<(), ApiError> {
        let api = self.api_handle();
        let result = api.delete_note(&id).await;
        self.settle_delete(id, result)
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Settle one answered request.
    ///
    /// # Errors
    ///
    /// The request's API error, after any rollback.
    pub fn settle(&mut self, response: Response) -> Result<(), ApiError> {
        match response {
            Response::Update(pending, result) => self.settle_update(pending, result),
            Response::Create(result) => self.settle_create(result).map(|_| ()),
            Response::Delete(id, result) => self.settle_delete(id, result),
        }
    }

    /// Split engine actions into remote requests and host actions.
    ///
    /// Updates in `actions` are already applied locally by the engine.
    #[must_use]
    pub fn prepare(&self, actions: Vec<Action>) -> Batch<A> {
        let mut requests = Vec::new();
        let mut forwarded = Vec::new();
        for action in actions {
            match action {
                Action::NoteUpdated { id, patch, previous } => {
                    requests.push(Request::Update(PendingUpdate { id, patch, previous }));
                }
                Action::CreateRequested(draft) => requests.push(Request::Create(draft)),
                Action::DeleteRequested { id } => requests.push(Request::Delete(id)),
                other => forwarded.push(other),
            }
        }
        Batch { api: self.api_handle(), requests, forwarded }
    }

    /// Settle every answer of a batch.
    ///
    /// Each request succeeds or fails on its own. Host actions come back in
    /// order, followed by a single [`Action::RenderNeeded`] if any request ran.
    pub fn finish(&mut self, completed: Completed) -> Dispatched {
        let Completed { responses, forwarded } = completed;
        let mut out = Dispatched { forwarded, failures: Vec::new() };
        let touched = !responses.is_empty();
        for response in responses {
            if let Err(e) = self.settle(response) {
                out.failures.push(e);
            }
        }
        if touched && !out.forwarded.contains(&Action::RenderNeeded) {
            out.forwarded.push(Action::RenderNeeded);
        }
        out
    }

    /// Run engine actions against the remote store.
    ///
    /// Holds the board for the whole round trip. Hosts that must keep handling
    /// input meanwhile call [`prepare`](Self::prepare), [`Batch::run`] and
    /// [`finish`](Self::finish) themselves.
    pub async fn dispatch(&mut self, actions: Vec<Action>) -> Dispatched {
        let completed = self.prepare(actions).run().await;
        self.finish(completed)
    }
}
