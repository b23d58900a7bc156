#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::consts::{GRID_SIZE, SNAP_THRESHOLD};

fn geom(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry { x, y, width: w, height: h }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_tracks_pointer_at_zoom_one() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(100.0, 100.0, 300.0, 300.0), pt(500.0, 500.0));
    g.update(pt(583.0, 488.0), &Camera::default(), SizeBounds::COMPACT);
    assert_eq!(g.live, geom(183.0, 88.0, 300.0, 300.0));
    assert!(g.moved);
}

#[test]
fn drag_divides_pointer_delta_by_zoom() {
    let cam = Camera { pan_x: 250.0, pan_y: -40.0, zoom: 2.0 };
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(0.0, 0.0, 200.0, 200.0), pt(10.0, 10.0));
    g.update(pt(110.0, -30.0), &cam, SizeBounds::COMPACT);
    assert_eq!(g.live.x, 50.0);
    assert_eq!(g.live.y, -20.0);
}

#[test]
fn drag_is_cumulative_from_start_not_incremental() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(0.0, 0.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(30.0, 0.0), &Camera::default(), SizeBounds::COMPACT);
    g.update(pt(50.0, 0.0), &Camera::default(), SizeBounds::COMPACT);
    assert_eq!(g.live.x, 50.0);
}

#[test]
fn drag_commit_snaps_position() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(100.0, 100.0, 300.0, 300.0), pt(0.0, 0.0));
    g.update(pt(83.0, -12.0), &Camera::default(), SizeBounds::COMPACT);
    let patch = g.commit(GRID_SIZE).unwrap();
    // (183, 88) snaps to (200, 80)
    assert_eq!(patch.position, Some(Position { x: 200.0, y: 80.0 }));
    assert!(patch.size.is_none());
}

#[test]
fn drag_without_movement_commits_nothing() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(100.0, 100.0, 300.0, 300.0), pt(5.0, 5.0));
    g.update(pt(5.0, 5.0), &Camera::default(), SizeBounds::COMPACT);
    assert!(g.commit(GRID_SIZE).is_none());
}

#[test]
fn drag_back_to_origin_still_commits() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(120.0, 80.0, 300.0, 300.0), pt(0.0, 0.0));
    g.update(pt(60.0, 0.0), &Camera::default(), SizeBounds::COMPACT);
    g.update(pt(0.0, 0.0), &Camera::default(), SizeBounds::COMPACT);
    let patch = g.commit(GRID_SIZE).unwrap();
    assert_eq!(patch.position, Some(Position { x: 120.0, y: 80.0 }));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_se_grows_both_axes_and_keeps_position() {
    let mut g = NoteGesture::resize(Uuid::new_v4(), ResizeAnchor::Se, geom(10.0, 20.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(50.0, 25.0), &Camera::default(), SizeBounds::COMPACT);
    assert_eq!(g.live, geom(10.0, 20.0, 250.0, 225.0));
}

#[test]
fn resize_e_only_changes_width() {
    let mut g = NoteGesture::resize(Uuid::new_v4(), ResizeAnchor::E, geom(0.0, 0.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(40.0, 90.0), &Camera::default(), SizeBounds::COMPACT);
    assert_eq!(g.live.width, 240.0);
    assert_eq!(g.live.height, 200.0);
}

#[test]
fn resize_s_only_changes_height() {
    let mut g = NoteGesture::resize(Uuid::new_v4(), ResizeAnchor::S, geom(0.0, 0.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(90.0, -30.0), &Camera::default(), SizeBounds::COMPACT);
    assert_eq!(g.live.width, 200.0);
    assert_eq!(g.live.height, 170.0);
}

#[test]
fn resize_always_within_bounds_for_extreme_deltas() {
    let cams = [Camera::default(), Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.1 }, Camera { pan_x: 0.0, pan_y: 0.0, zoom: 5.0 }];
    let pointers = [pt(-1e9, -1e9), pt(1e9, 1e9), pt(-1e9, 1e9), pt(-75.0, -75.0), pt(0.5, 0.5)];
    for bounds in [SizeBounds::COMPACT, SizeBounds::SPACIOUS] {
        for cam in &cams {
            for p in pointers {
                let mut g =
                    NoteGesture::resize(Uuid::new_v4(), ResizeAnchor::Se, geom(0.0, 0.0, 300.0, 300.0), pt(0.0, 0.0));
                g.update(p, cam, bounds);
                assert!((bounds.min..=bounds.max).contains(&g.live.width), "{bounds:?} {p:?}");
                assert!((bounds.min..=bounds.max).contains(&g.live.height), "{bounds:?} {p:?}");
            }
        }
    }
}

#[test]
fn resize_commit_is_not_snapped() {
    let mut g = NoteGesture::resize(Uuid::new_v4(), ResizeAnchor::Se, geom(0.0, 0.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(13.0, 7.0), &Camera::default(), SizeBounds::COMPACT);
    let patch = g.commit(GRID_SIZE).unwrap();
    assert_eq!(patch.size, Some(Size { width: 213.0, height: 207.0 }));
    assert!(patch.position.is_none());
}

// =============================================================
// Guides
// =============================================================

#[test]
fn guides_follow_live_geometry() {
    let mut g = NoteGesture::drag(Uuid::new_v4(), geom(0.0, 0.0, 200.0, 200.0), pt(0.0, 0.0));
    g.update(pt(18.0, 78.0), &Camera::default(), SizeBounds::COMPACT);
    // live = (18, 78): neither vertical edge is near a line. Top 78 and bottom
    // 278 are both near one; bottom wins.
    let lines = g.guides(GRID_SIZE, SNAP_THRESHOLD);
    assert_eq!(lines.vertical, None);
    assert_eq!(lines.horizontal, Some(280.0));
}
