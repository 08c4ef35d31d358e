use super::*;

fn snap() -> Snapshot {
    Snapshot { x: 1.0, y: 2.0, width: 30.0, height: 40.0, rotation: 5.0 }
}

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_creates_matching_kind() {
    assert_eq!(Tool::Select.creates(), None);
    assert_eq!(Tool::Rectangle.creates(), Some(ElementKind::Rectangle));
    assert_eq!(Tool::Circle.creates(), Some(ElementKind::Circle));
    assert_eq!(Tool::Text.creates(), Some(ElementKind::Text));
}

#[test]
fn tool_name_matches_wire_form() {
    for tool in [Tool::Select, Tool::Rectangle, Tool::Circle, Tool::Text] {
        assert_eq!(serde_json::to_value(tool).unwrap(), tool.as_str());
    }
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_delete_and_backspace_delete() {
    assert!(Key::new("Delete").is_delete());
    assert!(Key::new("Backspace").is_delete());
    assert!(!Key::new("d").is_delete());
}

#[test]
fn key_arrows_map_to_unit_steps() {
    assert_eq!(Key::new("ArrowUp").arrow(), Some((0.0, -1.0)));
    assert_eq!(Key::new("ArrowDown").arrow(), Some((0.0, 1.0)));
    assert_eq!(Key::new("ArrowLeft").arrow(), Some((-1.0, 0.0)));
    assert_eq!(Key::new("ArrowRight").arrow(), Some((1.0, 0.0)));
    assert_eq!(Key::new("Enter").arrow(), None);
}

// =============================================================
// HandleCorner / HitPart
// =============================================================

#[test]
fn handle_corner_offsets() {
    assert_eq!(HandleCorner::Nw.unit_offset(), (0.0, 0.0));
    assert_eq!(HandleCorner::Se.unit_offset(), (1.0, 1.0));
}

#[test]
fn hit_part_serde_names() {
    assert_eq!(serde_json::to_string(&HitPart::Body).unwrap(), "\"body\"");
    assert_eq!(serde_json::to_string(&HitPart::RotateHandle).unwrap(), "\"rotate_handle\"");
    assert_eq!(
        serde_json::to_string(&HitPart::ResizeHandle(HandleCorner::Ne)).unwrap(),
        "{\"resize_handle\":\"ne\"}"
    );
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_default_is_idle() {
    let g = Gesture::default();
    assert!(g.is_idle());
    assert_eq!(g.mode(), Mode::Idle);
    assert!(g.target().is_none());
}

#[test]
fn gesture_begin_body_drags() {
    let g = Gesture::begin("elem1".into(), HitPart::Body, Point::new(3.0, 4.0), snap());
    assert_eq!(g.mode(), Mode::Drag);
    assert_eq!(g.target().map(ElementId::as_str), Some("elem1"));
}

#[test]
fn gesture_begin_handle_resizes() {
    let g = Gesture::begin("elem1".into(), HitPart::ResizeHandle(HandleCorner::Sw), Point::new(0.0, 0.0), snap());
    assert_eq!(g.mode(), Mode::Resize);
    assert_eq!(g.corner(), Some(HandleCorner::Sw));
    match g {
        Gesture::Resizing { corner, snapshot, .. } => {
            assert_eq!(corner, HandleCorner::Sw);
            assert_eq!(snapshot, snap());
        }
        other => panic!("expected Resizing, got {other:?}"),
    }
}

#[test]
fn gesture_begin_rotate_handle_rotates() {
    let g = Gesture::begin("elem2".into(), HitPart::RotateHandle, Point::new(0.0, 0.0), snap());
    assert_eq!(g.mode(), Mode::Rotate);
    assert_eq!(g.corner(), None);
    assert!(!g.is_idle());
}

#[test]
fn mode_serde_lowercase() {
    assert_eq!(serde_json::to_string(&Mode::Resize).unwrap(), "\"resize\"");
}
