//! Document model: notes, their geometry, and the in-memory store.
//!
//! This module defines the wire types that describe what is on the board
//! (`Note`, `NoteDraft`), a sparse-update type for incremental edits
//! (`NotePatch`), the size bounds every note respects (`SizeBounds`), and the
//! runtime store that owns all live notes (`DocStore`).
//!
//! Data flows into this layer from the network (JSON deserialization) and from
//! the input engine (committed gestures). The renderer and hit-tester read from
//! `DocStore` via `sorted_notes` to determine stacking order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{DEFAULT_NOTE_COLOR, DEFAULT_NOTE_CONTENT, DEFAULT_NOTE_EMOJI, DEFAULT_NOTE_SIZE};

/// Unique identifier for a note. Assigned by the server.
pub type NoteId = Uuid;

/// Top-left corner of a note in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Note dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Inclusive size range applied to both axes of every note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub min: f64,
    pub max: f64,
}

impl SizeBounds {
    /// 150–400: the default profile.
    pub const COMPACT: Self = Self { min: 150.0, max: 400.0 };
    /// 300–800: for boards with larger cards.
    pub const SPACIOUS: Self = Self { min: 300.0, max: 800.0 };

    /// Clamp a single dimension. NaN collapses to `min`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() { self.min } else { value.clamp(self.min, self.max) }
    }

    /// Clamp both dimensions independently.
    #[must_use]
    pub fn clamp_size(&self, size: Size) -> Size {
        Size { width: self.clamp(size.width), height: self.clamp(size.height) }
    }

    /// Look up a profile by name (`"compact"` or `"spacious"`).
    #[must_use]
    pub fn from_profile(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "compact" => Some(Self::COMPACT),
            "spacious" => Some(Self::SPACIOUS),
            _ => None,
        }
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// Position and size of a note, flattened for gesture math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// A note as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Server-assigned identifier.
    pub id: NoteId,
    /// Body text.
    pub content: String,
    /// Optional heading shown above the body.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional emoji glyph shown in the header.
    #[serde(default)]
    pub emoji: Option<String>,
    /// Top-left corner in world coordinates.
    pub position: Position,
    /// Dimensions in world units.
    pub size: Size,
    /// CSS colour string.
    pub background_color: String,
    /// Stacking order; lower values are drawn beneath higher values.
    #[serde(default)]
    pub z_index: i64,
    /// Identity of the owning user. Never changes after creation.
    #[serde(default)]
    pub owner_id: String,
    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Last modification time in epoch milliseconds.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Note {
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry { x: self.position.x, y: self.position.y, width: self.size.width, height: self.size.height }
    }
}

/// Parameters for creating a note. The server assigns the id and owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub position: Position,
    pub size: Size,
    pub background_color: String,
    pub z_index: i64,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            content: DEFAULT_NOTE_CONTENT.to_owned(),
            title: None,
            emoji: Some(DEFAULT_NOTE_EMOJI.to_owned()),
            position: Position::default(),
            size: Size { width: DEFAULT_NOTE_SIZE, height: DEFAULT_NOTE_SIZE },
            background_color: DEFAULT_NOTE_COLOR.to_owned(),
            z_index: 0,
        }
    }
}

/// Sparse update for a note. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl NotePatch {
    /// A patch that only moves the note.
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self { position: Some(position), ..Default::default() }
    }

    /// A patch that only resizes the note.
    #[must_use]
    pub fn size(size: Size) -> Self {
        Self { size: Some(size), ..Default::default() }
    }

    /// A patch that only replaces the body text.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    /// Whether the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Capture the current values of exactly the fields this patch touches.
    ///
    /// Applying the result undoes the patch. A `None` title or emoji on the
    /// note is captured as an empty string, which the store treats as cleared.
    #[must_use]
    pub fn snapshot_of(&self, note: &Note) -> NotePatch {
        NotePatch {
            content: self.content.as_ref().map(|_| note.content.clone()),
            title: self.title.as_ref().map(|_| note.title.clone().unwrap_or_default()),
            emoji: self.emoji.as_ref().map(|_| note.emoji.clone().unwrap_or_default()),
            position: self.position.map(|_| note.position),
            size: self.size.map(|_| note.size),
            background_color: self.background_color.as_ref().map(|_| note.background_color.clone()),
            z_index: self.z_index.map(|_| note.z_index),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_owned()) }
}

/// `previous` if the field still holds `written`, otherwise nothing to restore.
fn unchanged_since<T: PartialEq + Clone>(current: Option<&T>, written: Option<&T>, previous: Option<&T>) -> Option<T> {
    if current.is_some() && current == written { previous.cloned() } else { None }
}

/// In-memory store of notes.
#[derive(Debug, Clone)]
pub struct DocStore {
    notes: HashMap<NoteId, Note>,
    bounds: SizeBounds,
}

impl DocStore {
    /// Create an empty store with the default size bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bounds(SizeBounds::default())
    }

    /// Create an empty store that clamps sizes to `bounds`.
    #[must_use]
    pub fn with_bounds(bounds: SizeBounds) -> Self {
        Self { notes: HashMap::new(), bounds }
    }

    /// Size bounds enforced on every write.
    #[must_use]
    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    /// Insert or replace a note, clamping its size.
    pub fn insert(&mut self, mut note: Note) {
        note.size = self.bounds.clamp_size(note.size);
        self.notes.insert(note.id, note);
    }

    /// Remove a note by id, returning it if it was present.
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        self.notes.remove(id)
    }

    /// Return a reference to a note by id.
    #[must_use]
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Whether a note with this id is present.
    #[must_use]
    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    /// Apply a partial update. Returns false if the note doesn't exist.
    ///
    /// Sizes are clamped to the store's bounds. An empty title or emoji clears it.
    pub fn apply_patch(&mut self, id: &NoteId, patch: &NotePatch) -> bool {
        let bounds = self.bounds;
        let Some(note) = self.notes.get_mut(id) else {
            return false;
        };
        if let Some(content) = &patch.content {
            note.content.clone_from(content);
        }
        if let Some(title) = &patch.title {
            note.title = non_empty(title);
        }
        if let Some(emoji) = &patch.emoji {
            note.emoji = non_empty(emoji);
        }
        if let Some(position) = patch.position {
            note.position = position;
        }
        if let Some(size) = patch.size {
            note.size = bounds.clamp_size(size);
        }
        if let Some(color) = &patch.background_color {
            note.background_color.clone_from(color);
        }
        if let Some(z) = patch.z_index {
            note.z_index = z;
        }
        true
    }

    /// Snapshot the fields `patch` touches, then apply it.
    ///
    /// Returns the snapshot (the undo patch), or `None` if the note is absent.
    pub fn apply_with_snapshot(&mut self, id: &NoteId, patch: &NotePatch) -> Option<NotePatch> {
        let snapshot = patch.snapshot_of(self.notes.get(id)?);
        self.apply_patch(id, patch);
        Some(snapshot)
    }

    /// Undo `patch` where the note still holds what it wrote.
    ///
    /// Each field touched by `patch` is set back to its value in `previous`
    /// unless a later write has changed it since. Returns false if the note
    /// doesn't exist.
    pub fn revert_patch(&mut self, id: &NoteId, patch: &NotePatch, previous: &NotePatch) -> bool {
        let Some(note) = self.notes.get(id) else {
            return false;
        };
        let current = patch.snapshot_of(note);
        let written = NotePatch { size: patch.size.map(|size| self.bounds.clamp_size(size)), ..patch.clone() };
        let undo = NotePatch {
            content: unchanged_since(current.content.as_ref(), written.content.as_ref(), previous.content.as_ref()),
            title: unchanged_since(current.title.as_ref(), written.title.as_ref(), previous.title.as_ref()),
            emoji: unchanged_since(current.emoji.as_ref(), written.emoji.as_ref(), previous.emoji.as_ref()),
            position: unchanged_since(current.position.as_ref(), written.position.as_ref(), previous.position.as_ref()),
            size: unchanged_since(current.size.as_ref(), written.size.as_ref(), previous.size.as_ref()),
            background_color: unchanged_since(
                current.background_color.as_ref(),
                written.background_color.as_ref(),
                previous.background_color.as_ref(),
            ),
            z_index: unchanged_since(current.z_index.as_ref(), written.z_index.as_ref(), previous.z_index.as_ref()),
        };
        self.apply_patch(id, &undo)
    }

    /// Record server timestamps on a note. Returns false if the note is absent.
    pub fn stamp(&mut self, id: &NoteId, created_at: Option<i64>, updated_at: Option<i64>) -> bool {
        let Some(note) = self.notes.get_mut(id) else {
            return false;
        };
        if created_at.is_some() {
            note.created_at = created_at;
        }
        if updated_at.is_some() {
            note.updated_at = updated_at;
        }
        true
    }

    /// Replace all notes with a full snapshot.
    pub fn load_snapshot(&mut self, notes: Vec<Note>) {
        self.notes.clear();
        for note in notes {
            self.insert(note);
        }
    }

    /// Return all notes sorted by `(z_index, id)`, bottom first.
    #[must_use]
    pub fn sorted_notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        notes
    }

    /// The highest z-index in use, or `None` when empty.
    #[must_use]
    pub fn max_z_index(&self) -> Option<i64> {
        self.notes.values().map(|n| n.z_index).max()
    }

    /// Number of notes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if the store contains no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
