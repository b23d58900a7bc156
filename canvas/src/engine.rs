use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{DEFAULT_NOTE_CONTENT, GRID_SIZE, SNAP_THRESHOLD};
use crate::doc::{DocStore, Geometry, Note, NoteDraft, NoteId, NotePatch, Position, SizeBounds};
use crate::gesture::NoteGesture;
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::render;
use crate::snap::{GridLines, snap_point};
use crate::viewport::ViewportController;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_MOVE: &str = "move";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A patch was applied locally and must be persisted. `previous` holds the
    /// touched fields as they were before the apply.
    NoteUpdated { id: NoteId, patch: NotePatch, previous: NotePatch },
    /// The user asked for a new note. The note appears once the server assigns an id.
    CreateRequested(NoteDraft),
    /// The user asked to delete a note. It stays until the server confirms.
    DeleteRequested { id: NoteId },
    /// Open a text editor for the note, seeded with `text`.
    EditTextRequested { id: NoteId, text: String },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub viewport: ViewportController,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_bounds(SizeBounds::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose notes are clamped to `bounds`.
    #[must_use]
    pub fn with_bounds(bounds: SizeBounds) -> Self {
        Self {
            doc: DocStore::with_bounds(bounds),
            viewport: ViewportController::new(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Hydrate the document from a server snapshot.
    pub fn load_snapshot(&mut self, notes: Vec<Note>) {
        self.input = InputState::Idle;
        self.ui = UiState::default();
        self.doc.load_snapshot(notes);
    }

    /// Insert a note the server has created.
    pub fn apply_create(&mut self, note: Note) {
        self.doc.insert(note);
    }

    /// Apply a patch without emitting an action. Returns false if the note is absent.
    pub fn apply_update(&mut self, id: &NoteId, patch: &NotePatch) -> bool {
        self.doc.apply_patch(id, patch)
    }

    /// Apply a patch and return the snapshot needed to undo it.
    pub fn apply_local(&mut self, id: &NoteId, patch: &NotePatch) -> Option<NotePatch> {
        self.doc.apply_with_snapshot(id, patch)
    }

    /// Undo a local patch in the fields no later write has changed.
    pub fn revert_local(&mut self, id: &NoteId, patch: &NotePatch, previous: &NotePatch) -> bool {
        self.doc.revert_patch(id, patch, previous)
    }

    /// Remove a note, dropping any selection, edit session or gesture on it.
    pub fn apply_delete(&mut self, id: &NoteId) -> Option<Note> {
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        if self.ui.editing_id.as_ref() == Some(id) {
            self.ui.editing_id = None;
        }
        if self.input.note_gesture().is_some_and(|g| &g.id == id) {
            self.input = InputState::Idle;
            self.ui.guides = GridLines::none();
        }
        self.doc.remove(id)
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    ///
    /// Resizing clears the canvas backing store, so a redraw is always requested.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        vec![Action::RenderNeeded]
    }

    /// Zoom about the viewport centre.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        if self.viewport.set_zoom(zoom, self.viewport_width, self.viewport_height) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Return to the identity transform.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.viewport.reset();
        if matches!(self.input, InputState::Panning(_)) {
            self.input = InputState::Idle;
        }
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }

        if ViewportController::is_pan_trigger(button, modifiers) {
            self.viewport.begin_pan(screen_pt);
            self.input = InputState::Panning(button);
            return vec![Action::SetCursor(CURSOR_GRABBING.to_owned())];
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let camera = self.camera();
        let Some(hit) = hit_test(camera.screen_to_world(screen_pt), &self.doc, &camera) else {
            if self.ui.selected_id.take().is_some() {
                return vec![Action::RenderNeeded];
            }
            return Vec::new();
        };

        self.ui.selected_id = Some(hit.note_id);
        if self.ui.editing_id == Some(hit.note_id) {
            return vec![Action::RenderNeeded];
        }
        let Some(start) = self.doc.get(&hit.note_id).map(Note::geometry) else {
            return Vec::new();
        };

        let gesture = match hit.part {
            HitPart::Body => NoteGesture::drag(hit.note_id, start, screen_pt),
            HitPart::ResizeHandle(anchor) => NoteGesture::resize(hit.note_id, anchor, start, screen_pt),
        };
        self.input = InputState::Note(gesture);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if matches!(self.input, InputState::Idle) {
            return vec![Action::SetCursor(self.hover_cursor(screen_pt).to_owned())];
        }

        let camera = self.camera();
        let bounds = self.doc.bounds();
        match &mut self.input {
            InputState::Panning(_) => {
                if self.viewport.pan_to(screen_pt) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::Note(gesture) => {
                gesture.update(screen_pt, &camera, bounds);
                self.ui.guides = gesture.guides(GRID_SIZE, SNAP_THRESHOLD);
                vec![Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let releases = match &self.input {
            InputState::Idle => false,
            InputState::Panning(trigger) => *trigger == button,
            InputState::Note(_) => button == Button::Primary,
        };
        if !releases {
            return Vec::new();
        }

        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning(_) => {
                self.viewport.end_pan();
                vec![Action::SetCursor(self.hover_cursor(screen_pt).to_owned())]
            }
            InputState::Note(mut gesture) => {
                let camera = self.camera();
                gesture.update(screen_pt, &camera, self.doc.bounds());
                self.ui.guides = GridLines::none();
                let mut actions = match gesture.commit(GRID_SIZE) {
                    Some(patch) => self.commit_patch(gesture.id, patch),
                    None => Vec::new(),
                };
                if !actions.contains(&Action::RenderNeeded) {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if self.viewport.on_wheel(screen_pt, delta, modifiers) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Enter text-edit mode for the note body under the pointer.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let camera = self.camera();
        let Some(hit) = hit_test(camera.screen_to_world(screen_pt), &self.doc, &camera) else {
            return Vec::new();
        };
        if hit.part != HitPart::Body {
            return Vec::new();
        }
        self.begin_edit(hit.note_id)
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_escape() {
            if self.input.note_gesture().is_some() {
                self.input = InputState::Idle;
                self.ui.guides = GridLines::none();
                return vec![Action::RenderNeeded];
            }
            if self.ui.editing_id.is_some() {
                return self.cancel_edit();
            }
            return Vec::new();
        }

        if key.is_delete() && self.ui.editing_id.is_none() {
            if let Some(id) = self.ui.selected_id {
                return self.request_delete(id);
            }
        }
        Vec::new()
    }

    // --- Text editing ---

    /// Open an edit session on `id`. The editor starts empty for default content.
    pub fn begin_edit(&mut self, id: NoteId) -> Vec<Action> {
        let Some(note) = self.doc.get(&id) else {
            return Vec::new();
        };
        let text = if note.content == DEFAULT_NOTE_CONTENT { String::new() } else { note.content.clone() };
        if self.input.note_gesture().is_some() {
            self.input = InputState::Idle;
            self.ui.guides = GridLines::none();
        }
        self.ui.selected_id = Some(id);
        self.ui.editing_id = Some(id);
        vec![Action::EditTextRequested { id, text }, Action::RenderNeeded]
    }

    /// Commit text from the host editor. Blank text reverts to the default content.
    pub fn commit_text(&mut self, id: &NoteId, text: &str) -> Vec<Action> {
        if self.ui.editing_id.as_ref() == Some(id) {
            self.ui.editing_id = None;
        }
        let content = if text.trim().is_empty() { DEFAULT_NOTE_CONTENT } else { text };
        self.commit_patch(*id, NotePatch::content(content))
    }

    /// Leave edit mode without touching the note.
    pub fn cancel_edit(&mut self) -> Vec<Action> {
        if self.ui.editing_id.take().is_some() {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Attribute edits ---

    pub fn set_color(&mut self, id: &NoteId, color: &str) -> Vec<Action> {
        self.commit_patch(*id, NotePatch { background_color: Some(color.to_owned()), ..Default::default() })
    }

    /// Set or clear (with an empty string) the note's emoji.
    pub fn set_emoji(&mut self, id: &NoteId, emoji: &str) -> Vec<Action> {
        self.commit_patch(*id, NotePatch { emoji: Some(emoji.to_owned()), ..Default::default() })
    }

    /// Set or clear (with an empty string) the note's title.
    pub fn set_title(&mut self, id: &NoteId, title: &str) -> Vec<Action> {
        self.commit_patch(*id, NotePatch { title: Some(title.trim().to_owned()), ..Default::default() })
    }

    // --- Create / delete ---

    /// Draft for a new note: default content, centred in the viewport,
    /// grid-snapped, stacked above every existing note.
    #[must_use]
    pub fn new_note_draft(&self) -> NoteDraft {
        let defaults = NoteDraft::default();
        let size = self.doc.bounds().clamp_size(defaults.size);
        let centre = self.camera().screen_to_world(Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5));
        let corner = Point::new(centre.x - size.width * 0.5, centre.y - size.height * 0.5);
        NoteDraft {
            position: Position::from(snap_point(corner, GRID_SIZE)),
            size,
            z_index: self.doc.max_z_index().map_or(0, |z| z + 1),
            ..defaults
        }
    }

    pub fn request_create(&self) -> Vec<Action> {
        vec![Action::CreateRequested(self.new_note_draft())]
    }

    pub fn request_delete(&self, id: NoteId) -> Vec<Action> {
        if self.doc.contains(&id) { vec![Action::DeleteRequested { id }] } else { Vec::new() }
    }

    // --- Queries ---

    /// The currently selected note, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NoteId> {
        self.ui.selected_id
    }

    /// The note in text-edit mode, if any.
    #[must_use]
    pub fn editing(&self) -> Option<NoteId> {
        self.ui.editing_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    /// Active snap guides.
    #[must_use]
    pub fn guides(&self) -> GridLines {
        self.ui.guides
    }

    /// Look up a note by ID.
    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.doc.get(id)
    }

    /// Geometry to display for a note: the live candidate while a gesture is
    /// on it, the stored geometry otherwise.
    #[must_use]
    pub fn geometry_of(&self, id: &NoteId) -> Option<Geometry> {
        match self.input.note_gesture() {
            Some(gesture) if &gesture.id == id => Some(gesture.live),
            _ => self.doc.get(id).map(Note::geometry),
        }
    }

    // --- Internal ---

    fn commit_patch(&mut self, id: NoteId, patch: NotePatch) -> Vec<Action> {
        match self.doc.apply_with_snapshot(&id, &patch) {
            Some(previous) => vec![Action::NoteUpdated { id, patch, previous }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    fn hover_cursor(&self, screen_pt: Point) -> &'static str {
        let camera = self.camera();
        match hit_test(camera.screen_to_world(screen_pt), &self.doc, &camera) {
            Some(hit) if self.ui.editing_id == Some(hit.note_id) => CURSOR_DEFAULT,
            Some(hit) => match hit.part {
                HitPart::Body => CURSOR_MOVE,
                HitPart::ResizeHandle(anchor) => anchor.cursor(),
            },
            None => CURSOR_DEFAULT,
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, bounds: SizeBounds) -> Self {
        Self { canvas, core: EngineCore::with_bounds(bounds) }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, notes: Vec<Note>) {
        self.core.load_snapshot(notes);
    }

    pub fn apply_create(&mut self, note: Note) {
        self.core.apply_create(note);
    }

    pub fn apply_delete(&mut self, id: &NoteId) -> Option<Note> {
        self.core.apply_delete(id)
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
        self.core.set_viewport(width_css, height_css, dpr)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the background grid and snap guides to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a drawing call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(
            &ctx,
            &self.core.camera(),
            &self.core.guides(),
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<NoteId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.core.note(id)
    }
}
