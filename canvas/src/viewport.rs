//! Viewport controller: owns the camera and turns pan/zoom input into camera
//! updates.
//!
//! Panning is engaged by the middle button or by the primary button with Alt
//! held; a plain primary drag is left for notes. Zoom is wheel input with the
//! platform zoom modifier and is anchored so the world point under the pointer
//! stays under the pointer. Plain wheel input pans.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Point, clamp_zoom};
use crate::consts::ZOOM_STEP;
use crate::input::{Button, Modifiers, WheelDelta};

/// Pan/zoom state for the board.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    camera: Camera,
    /// `pointer - pan` at pan start. `Some` while a pan is engaged.
    pan_anchor: Option<Point>,
}

impl ViewportController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Whether a pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Whether this press should start a pan rather than a note gesture.
    #[must_use]
    pub fn is_pan_trigger(button: Button, modifiers: Modifiers) -> bool {
        match button {
            Button::Middle => true,
            Button::Primary => modifiers.alt,
            Button::Secondary => false,
        }
    }

    /// Engage panning with the pointer at `pointer` (screen space).
    pub fn begin_pan(&mut self, pointer: Point) {
        self.pan_anchor = Some(pointer.sub(self.camera.pan()));
    }

    /// Move the pan with the pointer. Returns `true` if the camera changed.
    pub fn pan_to(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.pan_anchor else {
            return false;
        };
        let pan = pointer.sub(anchor);
        self.camera.pan_x = pan.x;
        self.camera.pan_y = pan.y;
        true
    }

    /// Disengage panning. No inertia.
    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    /// Handle a wheel event at `pointer`. Returns `true` if the camera changed.
    ///
    /// With the zoom modifier held, scrolling up zooms in by one step about the
    /// pointer. Otherwise the delta pans the board.
    pub fn on_wheel(&mut self, pointer: Point, delta: WheelDelta, modifiers: Modifiers) -> bool {
        if modifiers.zoom() {
            if delta.dy == 0.0 {
                return false;
            }
            let dir = -delta.dy.signum();
            let target = self.camera.zoom * (1.0 + dir * ZOOM_STEP);
            return self.zoom_about(pointer, target);
        }

        if delta.dx == 0.0 && delta.dy == 0.0 {
            return false;
        }
        self.camera.pan_x -= delta.dx;
        self.camera.pan_y -= delta.dy;
        true
    }

    /// Zoom to `zoom` (clamped), keeping the world point under `anchor` fixed.
    /// Returns `true` if the zoom changed.
    pub fn zoom_about(&mut self, anchor: Point, zoom: f64) -> bool {
        let old = self.camera.zoom;
        let new = clamp_zoom(zoom);
        if (new - old).abs() < f64::EPSILON {
            return false;
        }
        let ratio = new / old;
        self.camera.pan_x = anchor.x - (anchor.x - self.camera.pan_x) * ratio;
        self.camera.pan_y = anchor.y - (anchor.y - self.camera.pan_y) * ratio;
        self.camera.zoom = new;
        true
    }

    /// Zoom to `zoom` about the centre of a `width` x `height` viewport.
    pub fn set_zoom(&mut self, zoom: f64, width: f64, height: f64) -> bool {
        self.zoom_about(Point::new(width * 0.5, height * 0.5), zoom)
    }

    /// Replace the camera wholesale, clamping its zoom.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Camera { zoom: clamp_zoom(camera.zoom), ..camera };
    }

    /// Return to the identity transform and drop any pan in progress.
    pub fn reset(&mut self) {
        self.camera = Camera::default();
        self.pan_anchor = None;
    }
}
