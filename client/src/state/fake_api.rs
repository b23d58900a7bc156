//! In-memory [`BoardApi`] with failure injection for state tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use canvas::doc::SizeBounds;
use uuid::Uuid;

use crate::net::api::{ApiError, BoardApi};
use crate::net::types::{DashboardSettings, Note, NoteDraft, NoteId, NotePatch};

pub(crate) const OWNER: &str = "user_test";

#[derive(Default)]
pub(crate) struct FakeApi {
    pub notes: RefCell<HashMap<NoteId, Note>>,
    pub dashboard_title: RefCell<Option<String>>,
    pub clock: Cell<i64>,
    pub calls: RefCell<Vec<&'static str>>,
    pub fail_list: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub fail_updates: Cell<bool>,
    pub fail_dashboard: Cell<bool>,
    /// Deletes of these ids fail with a 503.
    pub fail_delete_ids: RefCell<HashSet<NoteId>>,
    /// Note writes currently awaiting an answer.
    pub in_flight: Cell<usize>,
    pub peak_in_flight: Cell<usize>,
}

fn unavailable() -> ApiError {
    ApiError::Http { status: 503, message: "unavailable".to_owned() }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a server-side note and return it.
    pub fn seed(&self, x: f64, y: f64) -> Note {
        let note = Note {
            id: Uuid::new_v4(),
            content: "seeded".to_owned(),
            title: None,
            emoji: None,
            position: canvas::doc::Position { x, y },
            size: canvas::doc::Size { width: 200.0, height: 200.0 },
            background_color: "#fef3c7".to_owned(),
            z_index: i64::try_from(self.notes.borrow().len()).unwrap_or(i64::MAX),
            owner_id: OWNER.to_owned(),
            created_at: Some(1),
            updated_at: Some(1),
        };
        self.notes.borrow_mut().insert(note.id, note.clone());
        note
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Hold a note write open for one scheduler turn so overlapping requests
    /// show up in `peak_in_flight`.
    async fn round_trip(&self) {
        self.in_flight.set(self.in_flight.get() + 1);
        self.peak_in_flight.set(self.peak_in_flight.get().max(self.in_flight.get()));
        tokio::task::yield_now().await;
        self.in_flight.set(self.in_flight.get() - 1);
    }

    fn tick(&self) -> i64 {
        self.clock.set(self.clock.get() + 1);
        1_000 + self.clock.get()
    }
}

#[async_trait(?Send)]
impl BoardApi for FakeApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.calls.borrow_mut().push("list");
        if self.fail_list.get() {
            return Err(unavailable());
        }
        let mut notes: Vec<Note> = self.notes.borrow().values().cloned().collect();
        notes.sort_by_key(|n| n.z_index);
        Ok(notes)
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        self.calls.borrow_mut().push("create");
        self.round_trip().await;
        if self.fail_create.get() {
            return Err(unavailable());
        }
        let now = self.tick();
        let note = Note {
            id: Uuid::new_v4(),
            content: draft.content.clone(),
            title: draft.title.clone(),
            emoji: draft.emoji.clone(),
            position: draft.position,
            size: SizeBounds::default().clamp_size(draft.size),
            background_color: draft.background_color.clone(),
            z_index: draft.z_index,
            owner_id: OWNER.to_owned(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.notes.borrow_mut().insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note, ApiError> {
        self.calls.borrow_mut().push("update");
        self.round_trip().await;
        if self.fail_updates.get() {
            return Err(unavailable());
        }
        let now = self.tick();
        let mut notes = self.notes.borrow_mut();
        let note = notes.get_mut(id).ok_or(ApiError::NotFound)?;
        if let Some(position) = patch.position {
            note.position = position;
        }
        if let Some(size) = patch.size {
            note.size = SizeBounds::default().clamp_size(size);
        }
        if let Some(content) = &patch.content {
            note.content.clone_from(content);
        }
        if let Some(color) = &patch.background_color {
            note.background_color.clone_from(color);
        }
        note.updated_at = Some(now);
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), ApiError> {
        self.calls.borrow_mut().push("delete");
        self.round_trip().await;
        if self.fail_delete_ids.borrow().contains(id) {
            return Err(unavailable());
        }
        self.notes.borrow_mut().remove(id).map(|_| ()).ok_or(ApiError::NotFound)
    }

    async fn get_dashboard(&self) -> Result<DashboardSettings, ApiError> {
        self.calls.borrow_mut().push("get_dashboard");
        if self.fail_dashboard.get() {
            return Err(unavailable());
        }
        let title = self
            .dashboard_title
            .borrow_mut()
            .get_or_insert_with(|| crate::net::types::DEFAULT_DASHBOARD_TITLE.to_owned())
            .clone();
        Ok(DashboardSettings { owner_id: OWNER.to_owned(), title, created_at: Some(1), updated_at: Some(1) })
    }

    async fn update_dashboard(&self, title: &str) -> Result<DashboardSettings, ApiError> {
        self.calls.borrow_mut().push("update_dashboard");
        if self.fail_dashboard.get() {
            return Err(unavailable());
        }
        *self.dashboard_title.borrow_mut() = Some(title.to_owned());
        let now = self.tick();
        Ok(DashboardSettings {
            owner_id: OWNER.to_owned(),
            title: title.to_owned(),
            created_at: Some(1),
            updated_at: Some(now),
        })
    }
}
