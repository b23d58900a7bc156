#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{DocStore, Geometry, NoteId};

/// Which part of a note was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Resize handles. Notes grow from the fixed top-left corner, so only the
/// right edge, bottom edge and bottom-right corner carry handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    /// Right edge: width only.
    E,
    /// Bottom-right corner: width and height.
    Se,
    /// Bottom edge: height only.
    S,
}

impl ResizeAnchor {
    /// Whether dragging this handle changes the width.
    #[must_use]
    pub fn resizes_width(self) -> bool {
        matches!(self, Self::E | Self::Se)
    }

    /// Whether dragging this handle changes the height.
    #[must_use]
    pub fn resizes_height(self) -> bool {
        matches!(self, Self::S | Self::Se)
    }

    /// CSS cursor shown while hovering the handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::E => "ew-resize",
            Self::S => "ns-resize",
            Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub note_id: NoteId,
    pub part: HitPart,
}

/// Which handle of `geom` (if any) is within `slop` world units of `pt`.
fn handle_at(pt: Point, geom: &Geometry, slop: f64) -> Option<ResizeAnchor> {
    let right = geom.x + geom.width;
    let bottom = geom.y + geom.height;
    let near_right = (pt.x - right).abs() <= slop;
    let near_bottom = (pt.y - bottom).abs() <= slop;
    let within_x = pt.x >= geom.x - slop && pt.x <= right + slop;
    let within_y = pt.y >= geom.y - slop && pt.y <= bottom + slop;

    if near_right && near_bottom {
        Some(ResizeAnchor::Se)
    } else if near_right && within_y {
        Some(ResizeAnchor::E)
    } else if near_bottom && within_x {
        Some(ResizeAnchor::S)
    } else {
        None
    }
}

/// Test which note (if any) is under `world_pt`, topmost first.
///
/// Handle slop is a fixed number of screen pixels, so it is converted to world
/// units with the camera. Handles are checked before the body of each note.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &DocStore, camera: &Camera) -> Option<Hit> {
    let slop = camera.screen_dist_to_world(HANDLE_RADIUS_PX);

    doc.sorted_notes().into_iter().rev().find_map(|note| {
        let geom = note.geometry();
        if let Some(anchor) = handle_at(world_pt, &geom, slop) {
            return Some(Hit { note_id: note.id, part: HitPart::ResizeHandle(anchor) });
        }
        geom.contains(world_pt)
            .then_some(Hit { note_id: note.id, part: HitPart::Body })
    })
}
