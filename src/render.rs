//! Scene rendering: rooms and selection to draw commands.
//!
//! A pure function of `(rooms, selection)` — it holds no state and performs
//! no mutation. The host replays the command list onto whatever surface it
//! owns, in order, every time the store or the selection changes.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_FILL, DEFAULT_LABEL, HANDLE_SIZE, LABEL_COLOR, LABEL_FONT,
    LABEL_OFFSET_X, LABEL_OFFSET_Y, ROOM_CORNER_RADIUS, STROKE_DEFAULT, STROKE_SELECTED,
    STROKE_WIDTH_DEFAULT, STROKE_WIDTH_SELECTED,
};
use crate::room::{Room, RoomId};

/// A single drawing instruction, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Erase the full canvas.
    Clear { width: f64, height: f64 },
    /// Filled and stroked rounded rectangle for a room body.
    RoundRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        fill: String,
        stroke: String,
        stroke_width: f64,
    },
    /// Room label near the top-left corner.
    Label { text: String, x: f64, y: f64, color: String, font: String },
    /// Resize-handle glyph at the bottom-right corner of the selected room.
    Handle { x: f64, y: f64, size: f64, color: String },
}

/// Render `rooms` in insertion order (bottom of the stack first), with the
/// selected room stroked in the highlight color and carrying the handle
/// glyph.
#[must_use]
pub fn render(rooms: &[Room], selected: Option<&RoomId>) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(1 + rooms.len() * 3);
    commands.push(DrawCommand::Clear { width: CANVAS_WIDTH, height: CANVAS_HEIGHT });

    for room in rooms {
        let is_selected = selected.is_some_and(|sel| room.id.as_ref() == Some(sel));
        commands.push(DrawCommand::RoundRect {
            x: room.x,
            y: room.y,
            w: room.w,
            h: room.h,
            radius: ROOM_CORNER_RADIUS,
            fill: if room.color.is_empty() { DEFAULT_FILL.to_owned() } else { room.color.clone() },
            stroke: if is_selected { STROKE_SELECTED.to_owned() } else { STROKE_DEFAULT.to_owned() },
            stroke_width: if is_selected { STROKE_WIDTH_SELECTED } else { STROKE_WIDTH_DEFAULT },
        });
        commands.push(DrawCommand::Label {
            text: if room.label.is_empty() { DEFAULT_LABEL.to_owned() } else { room.label.clone() },
            x: room.x + LABEL_OFFSET_X,
            y: room.y + LABEL_OFFSET_Y,
            color: LABEL_COLOR.to_owned(),
            font: LABEL_FONT.to_owned(),
        });
        if is_selected {
            commands.push(DrawCommand::Handle {
                x: room.x + room.w - HANDLE_SIZE,
                y: room.y + room.h - HANDLE_SIZE,
                size: HANDLE_SIZE,
                color: STROKE_SELECTED.to_owned(),
            });
        }
    }
    commands
}
