//! Input model: pointer buttons, cursor affordances, the drag state machine,
//! and persistent UI state (selection and the context menu).
//!
//! `DragState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying all context needed to compute geometry updates
//! without re-deriving it on every move event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::Point;
use crate::room::RoomId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Right mouse button (or two-finger tap); opens the context menu.
    Secondary,
}

/// Hover affordance surfaced while no drag is active. Cosmetic only — has no
/// effect on correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Over empty canvas.
    #[default]
    Default,
    /// Over a room body: the room can be moved.
    Move,
    /// Over a resize handle: diagonal resize.
    ResizeNwse,
}

/// The active pointer gesture.
///
/// Each active variant carries the context captured at pointer-down; the
/// gesture ends unconditionally on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is moving a room across the canvas.
    Moving {
        /// Id of the room being moved.
        id: RoomId,
        /// Pointer-minus-origin offset at pointer-down, preserved for the
        /// whole drag so the room does not jump to center-under-cursor.
        grab_dx: f64,
        grab_dy: f64,
        /// Dimensions at pointer-down, used to clamp against the far canvas
        /// edges while moving.
        orig_w: f64,
        orig_h: f64,
    },
    /// The user is resizing a room from its bottom-right handle. The room's
    /// origin stays fixed for the whole gesture.
    Resizing {
        /// Id of the room being resized.
        id: RoomId,
        /// Pointer position at pointer-down; deltas are measured from here.
        anchor: Point,
        /// Width at pointer-down.
        orig_w: f64,
        /// Height at pointer-down.
        orig_h: f64,
    },
}

impl DragState {
    /// The room this gesture is scoped to, if one is active.
    #[must_use]
    pub fn room_id(&self) -> Option<&RoomId> {
        match self {
            Self::Idle => None,
            Self::Moving { id, .. } | Self::Resizing { id, .. } => Some(id),
        }
    }
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

/// An open context menu, anchored where the secondary click landed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    /// Canvas position of the opening click.
    pub anchor: Point,
    /// The room the menu's rename/recolor/delete actions operate on.
    pub target: RoomId,
}

/// Persistent UI state visible to the renderer and the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The id of the currently selected room, if any.
    pub selected_id: Option<RoomId>,
    /// The open context menu, if any.
    pub menu: Option<ContextMenu>,
}
