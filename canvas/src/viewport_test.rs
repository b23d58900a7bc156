#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{MAX_ZOOM, MIN_ZOOM};

const EPS: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn wheel(dx: f64, dy: f64) -> WheelDelta {
    WheelDelta { dx, dy }
}

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

// =============================================================
// Pan trigger
// =============================================================

#[test]
fn middle_button_triggers_pan() {
    assert!(ViewportController::is_pan_trigger(Button::Middle, Modifiers::default()));
}

#[test]
fn plain_primary_does_not_trigger_pan() {
    assert!(!ViewportController::is_pan_trigger(Button::Primary, Modifiers::default()));
    assert!(!ViewportController::is_pan_trigger(Button::Primary, ctrl()));
}

#[test]
fn alt_primary_triggers_pan() {
    let alt = Modifiers { alt: true, ..Default::default() };
    assert!(ViewportController::is_pan_trigger(Button::Primary, alt));
    assert!(!ViewportController::is_pan_trigger(Button::Secondary, alt));
}

// =============================================================
// Pan
// =============================================================

#[test]
fn pan_follows_pointer_from_anchor() {
    let mut vp = ViewportController::new();
    vp.set_camera(Camera { pan_x: 10.0, pan_y: 20.0, zoom: 2.0 });
    vp.begin_pan(pt(100.0, 100.0));
    assert!(vp.is_panning());
    assert!(vp.pan_to(pt(130.0, 80.0)));
    let cam = vp.camera();
    assert_eq!((cam.pan_x, cam.pan_y), (40.0, 0.0));
    assert_eq!(cam.zoom, 2.0);
}

#[test]
fn pan_to_without_engagement_is_noop() {
    let mut vp = ViewportController::new();
    assert!(!vp.pan_to(pt(50.0, 50.0)));
    assert_eq!(vp.camera(), Camera::default());
}

#[test]
fn end_pan_disengages() {
    let mut vp = ViewportController::new();
    vp.begin_pan(pt(0.0, 0.0));
    vp.end_pan();
    assert!(!vp.is_panning());
    assert!(!vp.pan_to(pt(10.0, 10.0)));
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn plain_wheel_pans_by_delta() {
    let mut vp = ViewportController::new();
    assert!(vp.on_wheel(pt(0.0, 0.0), wheel(5.0, 30.0), Modifiers::default()));
    let cam = vp.camera();
    assert_eq!((cam.pan_x, cam.pan_y, cam.zoom), (-5.0, -30.0, 1.0));
}

#[test]
fn ctrl_wheel_up_zooms_in_one_step() {
    let mut vp = ViewportController::new();
    vp.on_wheel(pt(0.0, 0.0), wheel(0.0, -100.0), ctrl());
    assert!((vp.camera().zoom - 1.03).abs() < EPS);
}

#[test]
fn meta_wheel_down_zooms_out_one_step() {
    let mut vp = ViewportController::new();
    let meta = Modifiers { meta: true, ..Default::default() };
    vp.on_wheel(pt(0.0, 0.0), wheel(0.0, 4.0), meta);
    assert!((vp.camera().zoom - 0.97).abs() < EPS);
}

#[test]
fn zoom_wheel_with_zero_dy_is_noop() {
    let mut vp = ViewportController::new();
    assert!(!vp.on_wheel(pt(10.0, 10.0), wheel(12.0, 0.0), ctrl()));
    assert_eq!(vp.camera(), Camera::default());
}

#[test]
fn zoom_keeps_world_point_under_pointer() {
    let mut vp = ViewportController::new();
    vp.set_camera(Camera { pan_x: 137.0, pan_y: -58.0, zoom: 1.7 });
    let pointer = pt(412.0, 233.0);
    for dy in [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0] {
        let before = vp.camera().screen_to_world(pointer);
        vp.on_wheel(pointer, wheel(0.0, dy), ctrl());
        let after = vp.camera().screen_to_world(pointer);
        assert!(approx(before, after), "{before:?} vs {after:?}");
    }
}

#[test]
fn repeated_zoom_in_never_exceeds_max() {
    let mut vp = ViewportController::new();
    for _ in 0..500 {
        vp.on_wheel(pt(300.0, 200.0), wheel(0.0, -1.0), ctrl());
        assert!(vp.camera().zoom <= MAX_ZOOM);
    }
    assert_eq!(vp.camera().zoom, MAX_ZOOM);
    assert!(!vp.on_wheel(pt(300.0, 200.0), wheel(0.0, -1.0), ctrl()));
}

#[test]
fn repeated_zoom_out_never_below_min() {
    let mut vp = ViewportController::new();
    for _ in 0..500 {
        vp.on_wheel(pt(0.0, 0.0), wheel(0.0, 1.0), ctrl());
        assert!(vp.camera().zoom >= MIN_ZOOM);
    }
    assert_eq!(vp.camera().zoom, MIN_ZOOM);
}

// =============================================================
// Host-driven zoom
// =============================================================

#[test]
fn set_zoom_clamps_and_anchors_on_centre() {
    let mut vp = ViewportController::new();
    let centre = pt(400.0, 300.0);
    let before = vp.camera().screen_to_world(centre);
    vp.set_zoom(50.0, 800.0, 600.0);
    assert_eq!(vp.camera().zoom, MAX_ZOOM);
    assert!(approx(before, vp.camera().screen_to_world(centre)));
}

#[test]
fn set_camera_clamps_zoom() {
    let mut vp = ViewportController::new();
    vp.set_camera(Camera { pan_x: 1.0, pan_y: 2.0, zoom: f64::NAN });
    assert_eq!(vp.camera().zoom, 1.0);
    vp.set_camera(Camera { pan_x: 1.0, pan_y: 2.0, zoom: 0.0 });
    assert_eq!(vp.camera().zoom, MIN_ZOOM);
}

#[test]
fn reset_returns_to_identity() {
    let mut vp = ViewportController::new();
    vp.set_camera(Camera { pan_x: 99.0, pan_y: -4.0, zoom: 3.0 });
    vp.begin_pan(pt(1.0, 1.0));
    vp.reset();
    assert_eq!(vp.camera(), Camera::default());
    assert!(!vp.is_panning());
}
