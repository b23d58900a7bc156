//! Grid snapping and alignment guides.
//!
//! `snap` quantises a world coordinate to the grid; it is applied to note
//! positions when a drag is committed. `check_alignment` is advisory only: it
//! reports which grid lines a rectangle's edges are close to so the renderer
//! can draw guides while a gesture is live.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::camera::Point;

/// Active snap guides in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridLines {
    /// World y of a horizontal guide (from the top or bottom edge).
    pub horizontal: Option<f64>,
    /// World x of a vertical guide (from the left or right edge).
    pub vertical: Option<f64>,
}

impl GridLines {
    /// No guides.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any guide is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }
}

/// Round `value` to the nearest multiple of `grid_size`.
#[must_use]
pub fn snap(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap both coordinates of a point.
#[must_use]
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(snap(point.x, grid_size), snap(point.y, grid_size))
}

/// Report grid lines within `threshold` of the rectangle's edges.
///
/// Left/right edges produce vertical guides, top/bottom edges produce
/// horizontal guides. When both edges of an axis are within the threshold the
/// later one (right, bottom) wins.
#[must_use]
pub fn check_alignment(position: Point, width: f64, height: f64, grid_size: f64, threshold: f64) -> GridLines {
    let mut lines = GridLines::none();

    for edge in [position.x, position.x + width] {
        let line = snap(edge, grid_size);
        if (edge - line).abs() < threshold {
            lines.vertical = Some(line);
        }
    }
    for edge in [position.y, position.y + height] {
        let line = snap(edge, grid_size);
        if (edge - line).abs() < threshold {
            lines.horizontal = Some(line);
        }
    }

    lines
}
