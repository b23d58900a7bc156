//! Note geometry controller: the drag/resize state machine for one note.
//!
//! A gesture is created on pointer-down over a note, fed every pointer-move,
//! and consumed on pointer-up. While live it only produces candidate geometry;
//! the document is untouched until [`NoteGesture::commit`] turns the final
//! geometry into a [`NotePatch`]. Pointer deltas are measured in screen pixels
//! and converted through the camera, so a note tracks the pointer at any zoom.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::camera::{Camera, Point};
use crate::doc::{Geometry, NoteId, NotePatch, Position, Size, SizeBounds};
use crate::hit::ResizeAnchor;
use crate::snap::{GridLines, check_alignment, snap_point};

/// What the gesture does to the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// Moving the note; size is fixed.
    Dragging,
    /// Growing or shrinking the note from a handle; the top-left corner is fixed.
    Resizing(ResizeAnchor),
}

/// An in-progress drag or resize of a single note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteGesture {
    /// The note under manipulation.
    pub id: NoteId,
    /// Drag or resize.
    pub mode: GestureMode,
    /// Geometry when the pointer went down.
    pub start: Geometry,
    /// Screen-space pointer position at pointer-down.
    pub pointer_start: Point,
    /// Candidate geometry tracking the pointer.
    pub live: Geometry,
    /// Whether the pointer has moved since pointer-down.
    pub moved: bool,
}

impl NoteGesture {
    /// Begin dragging a note.
    #[must_use]
    pub fn drag(id: NoteId, start: Geometry, pointer_start: Point) -> Self {
        Self { id, mode: GestureMode::Dragging, start, pointer_start, live: start, moved: false }
    }

    /// Begin resizing a note from `anchor`.
    #[must_use]
    pub fn resize(id: NoteId, anchor: ResizeAnchor, start: Geometry, pointer_start: Point) -> Self {
        Self { id, mode: GestureMode::Resizing(anchor), start, pointer_start, live: start, moved: false }
    }

    /// Recompute the live geometry for the pointer at `pointer` (screen space).
    pub fn update(&mut self, pointer: Point, camera: &Camera, bounds: SizeBounds) {
        let delta = camera.screen_delta_to_world(pointer.sub(self.pointer_start));
        if delta.x != 0.0 || delta.y != 0.0 {
            self.moved = true;
        }

        match self.mode {
            GestureMode::Dragging => {
                self.live.x = self.start.x + delta.x;
                self.live.y = self.start.y + delta.y;
            }
            GestureMode::Resizing(anchor) => {
                if anchor.resizes_width() {
                    self.live.width = bounds.clamp(self.start.width + delta.x);
                }
                if anchor.resizes_height() {
                    self.live.height = bounds.clamp(self.start.height + delta.y);
                }
            }
        }
    }

    /// Guides for the live geometry.
    #[must_use]
    pub fn guides(&self, grid_size: f64, threshold: f64) -> GridLines {
        check_alignment(self.live.position(), self.live.width, self.live.height, grid_size, threshold)
    }

    /// Final patch for the gesture, or `None` if the pointer never moved.
    ///
    /// Drags commit the grid-snapped position. Resizes commit the clamped size
    /// unsnapped.
    #[must_use]
    pub fn commit(&self, grid_size: f64) -> Option<NotePatch> {
        if !self.moved {
            return None;
        }
        let patch = match self.mode {
            GestureMode::Dragging => NotePatch::position(Position::from(snap_point(self.live.position(), grid_size))),
            GestureMode::Resizing(_) => NotePatch::size(Size { width: self.live.width, height: self.live.height }),
        };
        Some(patch)
    }
}
