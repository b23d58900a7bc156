use uuid::Uuid;

use super::*;
use crate::doc::{Note, Position, Size};

fn make_note(x: f64, y: f64, w: f64, h: f64, z: i64) -> Note {
    Note {
        id: Uuid::new_v4(),
        content: "New Note".to_owned(),
        title: None,
        emoji: None,
        position: Position { x, y },
        size: Size { width: w, height: h },
        background_color: "#fef3c7".to_owned(),
        z_index: z,
        owner_id: String::new(),
        created_at: None,
        updated_at: None,
    }
}

fn store_with(notes: Vec<Note>) -> DocStore {
    let mut doc = DocStore::new();
    for n in notes {
        doc.insert(n);
    }
    doc
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn resize_anchor_axes() {
    assert!(ResizeAnchor::E.resizes_width());
    assert!(!ResizeAnchor::E.resizes_height());
    assert!(!ResizeAnchor::S.resizes_width());
    assert!(ResizeAnchor::S.resizes_height());
    assert!(ResizeAnchor::Se.resizes_width());
    assert!(ResizeAnchor::Se.resizes_height());
}

#[test]
fn resize_anchor_cursors() {
    assert_eq!(ResizeAnchor::E.cursor(), "ew-resize");
    assert_eq!(ResizeAnchor::S.cursor(), "ns-resize");
    assert_eq!(ResizeAnchor::Se.cursor(), "nwse-resize");
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_empty_store_is_none() {
    let doc = DocStore::new();
    assert!(hit_test(Point::new(0.0, 0.0), &doc, &Camera::default()).is_none());
}

#[test]
fn hit_body_inside_note() {
    let note = make_note(0.0, 0.0, 200.0, 200.0, 0);
    let id = note.id;
    let doc = store_with(vec![note]);
    let hit = hit_test(Point::new(100.0, 100.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.note_id, id);
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn hit_miss_outside_note() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    assert!(hit_test(Point::new(300.0, 300.0), &doc, &Camera::default()).is_none());
}

#[test]
fn hit_bottom_right_corner_is_se_handle() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    let hit = hit_test(Point::new(203.0, 198.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeAnchor::Se));
}

#[test]
fn hit_right_edge_is_e_handle() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    let hit = hit_test(Point::new(201.0, 100.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeAnchor::E));
}

#[test]
fn hit_bottom_edge_is_s_handle() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    let hit = hit_test(Point::new(100.0, 196.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(ResizeAnchor::S));
}

#[test]
fn hit_left_and_top_edges_are_body() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    let left = hit_test(Point::new(1.0, 100.0), &doc, &Camera::default()).unwrap();
    let top = hit_test(Point::new(100.0, 1.0), &doc, &Camera::default()).unwrap();
    assert_eq!(left.part, HitPart::Body);
    assert_eq!(top.part, HitPart::Body);
}

#[test]
fn hit_handle_slop_shrinks_in_world_when_zoomed_in() {
    let doc = store_with(vec![make_note(0.0, 0.0, 200.0, 200.0, 0)]);
    // At zoom 4 the 8px slop is 2 world units; 5 units inside the edge is body.
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let hit = hit_test(Point::new(195.0, 100.0), &doc, &cam).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn hit_prefers_topmost_note() {
    let below = make_note(0.0, 0.0, 200.0, 200.0, 1);
    let above = make_note(50.0, 50.0, 200.0, 200.0, 5);
    let above_id = above.id;
    let doc = store_with(vec![below, above]);
    let hit = hit_test(Point::new(100.0, 100.0), &doc, &Camera::default()).unwrap();
    assert_eq!(hit.note_id, above_id);
}
