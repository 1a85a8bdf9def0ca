#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_room(id: &str, x: f64, y: f64) -> Room {
    Room {
        id: Some(RoomId::new(id)),
        x,
        y,
        w: 160.0,
        h: 100.0,
        label: "Kitchen".to_owned(),
        color: "#22c55e".to_owned(),
    }
}

// =============================================================
// Frame structure
// =============================================================

#[test]
fn empty_scene_is_just_a_clear() {
    let commands = render(&[], None);
    assert_eq!(commands, vec![DrawCommand::Clear { width: CANVAS_WIDTH, height: CANVAS_HEIGHT }]);
}

#[test]
fn clear_always_comes_first() {
    let rooms = [make_room("r1", 0.0, 0.0)];
    let commands = render(&rooms, None);
    assert!(matches!(commands[0], DrawCommand::Clear { .. }));
}

#[test]
fn unselected_room_draws_body_and_label_only() {
    let rooms = [make_room("r1", 10.0, 20.0)];
    let commands = render(&rooms, None);
    assert_eq!(commands.len(), 3); // clear + rect + label
    let DrawCommand::RoundRect { x, y, w, h, ref fill, ref stroke, stroke_width, .. } = commands[1]
    else {
        panic!("expected RoundRect, got {:?}", commands[1]);
    };
    assert_eq!((x, y, w, h), (10.0, 20.0, 160.0, 100.0));
    assert_eq!(fill, "#22c55e");
    assert_eq!(stroke, STROKE_DEFAULT);
    assert_eq!(stroke_width, STROKE_WIDTH_DEFAULT);
}

#[test]
fn label_is_offset_from_room_origin() {
    let rooms = [make_room("r1", 10.0, 20.0)];
    let commands = render(&rooms, None);
    let DrawCommand::Label { ref text, x, y, .. } = commands[2] else {
        panic!("expected Label, got {:?}", commands[2]);
    };
    assert_eq!(text, "Kitchen");
    assert_eq!(x, 10.0 + LABEL_OFFSET_X);
    assert_eq!(y, 20.0 + LABEL_OFFSET_Y);
}

// =============================================================
// Selection highlight
// =============================================================

#[test]
fn selected_room_gets_highlight_stroke_and_handle() {
    let rooms = [make_room("r1", 10.0, 20.0)];
    let selected = RoomId::new("r1");
    let commands = render(&rooms, Some(&selected));
    assert_eq!(commands.len(), 4); // clear + rect + label + handle
    let DrawCommand::RoundRect { ref stroke, stroke_width, .. } = commands[1] else {
        panic!("expected RoundRect");
    };
    assert_eq!(stroke, STROKE_SELECTED);
    assert_eq!(stroke_width, STROKE_WIDTH_SELECTED);
    let DrawCommand::Handle { x, y, size, .. } = commands[3] else {
        panic!("expected Handle, got {:?}", commands[3]);
    };
    assert_eq!(x, 10.0 + 160.0 - HANDLE_SIZE);
    assert_eq!(y, 20.0 + 100.0 - HANDLE_SIZE);
    assert_eq!(size, HANDLE_SIZE);
}

#[test]
fn only_the_selected_room_is_highlighted() {
    let rooms = [make_room("a", 0.0, 0.0), make_room("b", 500.0, 300.0)];
    let selected = RoomId::new("b");
    let commands = render(&rooms, Some(&selected));
    let handles: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Handle { .. }))
        .collect();
    assert_eq!(handles.len(), 1);
    let DrawCommand::RoundRect { ref stroke, .. } = commands[1] else {
        panic!("expected RoundRect");
    };
    assert_eq!(stroke, STROKE_DEFAULT); // room "a" stays plain
}

#[test]
fn selection_of_unknown_id_highlights_nothing() {
    let rooms = [make_room("a", 0.0, 0.0)];
    let selected = RoomId::new("ghost");
    let commands = render(&rooms, Some(&selected));
    assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Handle { .. })));
}

#[test]
fn draft_room_is_never_treated_as_selected() {
    let mut room = make_room("a", 0.0, 0.0);
    room.id = None;
    let commands = render(&[room], None);
    assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Handle { .. })));
}

// =============================================================
// Draw order and defaults
// =============================================================

#[test]
fn rooms_paint_in_insertion_order() {
    let rooms = [make_room("bottom", 0.0, 0.0), make_room("top", 50.0, 50.0)];
    let commands = render(&rooms, None);
    let rects: Vec<f64> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::RoundRect { x, .. } => Some(*x),
            _ => None,
        })
        .collect();
    assert_eq!(rects, vec![0.0, 50.0]);
}

#[test]
fn blank_label_and_color_fall_back_to_defaults() {
    let mut room = make_room("r1", 0.0, 0.0);
    room.label = String::new();
    room.color = String::new();
    let commands = render(&[room], None);
    let DrawCommand::RoundRect { ref fill, .. } = commands[1] else {
        panic!("expected RoundRect");
    };
    assert_eq!(fill, DEFAULT_FILL);
    let DrawCommand::Label { ref text, .. } = commands[2] else {
        panic!("expected Label");
    };
    assert_eq!(text, DEFAULT_LABEL);
}

#[test]
fn rendering_is_pure() {
    let rooms = [make_room("r1", 10.0, 20.0)];
    let selected = RoomId::new("r1");
    let first = render(&rooms, Some(&selected));
    let second = render(&rooms, Some(&selected));
    assert_eq!(first, second);
}
