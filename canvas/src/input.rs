//! Input model: modifier keys, mouse buttons, wheel deltas, and the active gesture.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a pointer
//! event. `InputState` is the gesture being tracked between pointer-down and
//! pointer-up; `UiState` is the persistent interaction state the renderer and
//! host read (selection, edit session, snap guides).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::NoteId;
use crate::gesture::NoteGesture;
use crate::snap::GridLines;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the platform zoom modifier (Ctrl or Command) is held.
    #[must_use]
    pub fn zoom(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key asks for the selected note to be removed.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// Whether this key aborts the current gesture or edit session.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer and the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected note, if any.
    pub selected_id: Option<NoteId>,
    /// The note whose text is being edited, if any. Gestures on it are suppressed.
    pub editing_id: Option<NoteId>,
    /// Snap guides for the note under an active gesture.
    pub guides: GridLines,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas with the given button held. The anchor
    /// lives in the viewport controller.
    Panning(Button),
    /// The user is dragging or resizing a note.
    Note(NoteGesture),
}

impl InputState {
    /// The note gesture in progress, if any.
    #[must_use]
    pub fn note_gesture(&self) -> Option<&NoteGesture> {
        match self {
            Self::Note(gesture) => Some(gesture),
            _ => None,
        }
    }
}
