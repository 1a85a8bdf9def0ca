//! Geometry and hit-testing against rooms on the canvas.
//!
//! Pure functions: given the current room list and a pointer position,
//! answer "which room is under the pointer" and "is the pointer on this
//! room's resize handle". Hit order is the reverse of insertion order, so
//! with overlapping rooms the most recently added one wins — the same order
//! the renderer paints them in.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::consts::HANDLE_SIZE;
use crate::room::Room;

/// A point on the canvas, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether `pt` falls inside `room`'s bounding box (edges inclusive).
#[must_use]
pub fn contains(room: &Room, pt: Point) -> bool {
    pt.x >= room.x && pt.x <= room.x + room.w && pt.y >= room.y && pt.y <= room.y + room.h
}

/// The topmost room containing `pt`, scanning in reverse insertion order.
#[must_use]
pub fn room_at(rooms: &[Room], pt: Point) -> Option<&Room> {
    rooms.iter().rev().find(|r| contains(r, pt))
}

/// Whether `pt` falls on the resize handle: a `HANDLE_SIZE` square anchored
/// at `room`'s bottom-right corner, kept inside the room's bounds. Rooms
/// smaller than the handle still expose it (the square then covers most of
/// the room).
#[must_use]
pub fn on_resize_handle(room: &Room, pt: Point) -> bool {
    pt.x >= room.x + room.w - HANDLE_SIZE
        && pt.x <= room.x + room.w
        && pt.y >= room.y + room.h - HANDLE_SIZE
        && pt.y <= room.y + room.h
}
