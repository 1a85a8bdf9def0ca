//! Editor engine: translates pointer and menu events into room mutations.
//!
//! `EditorCore` owns the room store, the selection/menu state, and the
//! active drag. Event handlers return [`Action`]s for the host to process —
//! scheduling debounced saves, updating the cursor, redrawing. The engine
//! itself never talks to the network; that is the synchronizer's job.
//!
//! Geometry is clamped to the canvas bounds on every mutation, so the
//! invariant `x + w <= CANVAS_WIDTH && y + h <= CANVAS_HEIGHT` holds
//! continuously during a drag, not just at drag end.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::geom::{self, Point};
use crate::input::{Button, ContextMenu, Cursor, DragState, UiState};
use crate::room::{Room, RoomId, RoomPatch, RoomStore};

/// How the canvas-edge clamp interacts with the minimum-size floor when a
/// resize runs into the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeClampPolicy {
    /// The edge clamp applies last: a room whose origin sits closer than the
    /// minimum size to the far edge shrinks below the 40x30 floor.
    #[default]
    EdgeWins,
    /// The minimum floor applies last: such a room keeps its minimum size
    /// and may extend past the canvas edge instead.
    MinSizeWins,
}

impl ResizeClampPolicy {
    /// Parse a host configuration value. Anything other than
    /// `"min-size-wins"` selects the default.
    #[must_use]
    pub fn from_config(value: &str) -> Self {
        match value {
            "min-size-wins" => Self::MinSizeWins,
            _ => Self::EdgeWins,
        }
    }
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    pub resize_clamp: ResizeClampPolicy,
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A room's geometry or appearance changed; schedule a debounced save.
    RoomEdited(RoomId),
    /// The hover affordance changed.
    SetCursor(Cursor),
    /// Something observable changed; redraw.
    RenderNeeded,
}

/// Core editor state: the room store, selection/menu, and the active drag.
pub struct EditorCore {
    pub store: RoomStore,
    pub ui: UiState,
    pub drag: DragState,
    config: EngineConfig,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store: RoomStore::new(),
            ui: UiState::default(),
            drag: DragState::Idle,
            config,
        }
    }

    // --- Data inputs (from the synchronizer) ---

    /// Insert a server-acknowledged room and select it.
    pub fn insert_room(&mut self, room: Room) {
        self.ui.selected_id = room.id.clone();
        self.store.add(room);
    }

    /// Remove a room, clearing any selection, open menu, or drag that
    /// referenced it.
    pub fn remove_room(&mut self, id: &RoomId) -> Option<Room> {
        let removed = self.store.remove(id)?;
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        if self.ui.menu.as_ref().is_some_and(|m| &m.target == id) {
            self.ui.menu = None;
        }
        if self.drag.room_id() == Some(id) {
            self.drag = DragState::Idle;
        }
        Some(removed)
    }

    /// Replace the store with an authoritative snapshot, dropping all
    /// local-only UI state (selection, menu, drag).
    pub fn replace_all(&mut self, rooms: Vec<Room>) {
        self.store.replace_all(rooms);
        self.ui = UiState::default();
        self.drag = DragState::Idle;
    }

    /// Empty the store and drop all local-only UI state.
    pub fn clear(&mut self) {
        self.store.clear();
        self.ui = UiState::default();
        self.drag = DragState::Idle;
    }

    // --- Pointer events ---

    /// Primary pointer press: select and begin a move or resize gesture, or
    /// clear the selection on empty canvas. Any open context menu closes.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.ui.menu.take().is_some() {
            actions.push(Action::RenderNeeded);
        }

        let hit = geom::room_at(self.store.rooms(), pt)
            .map(|room| (room.id.clone(), geom::on_resize_handle(room, pt), room.x, room.y, room.w, room.h));
        match hit {
            Some((Some(id), on_handle, x, y, w, h)) => {
                self.ui.selected_id = Some(id.clone());
                self.drag = if on_handle {
                    DragState::Resizing { id, anchor: pt, orig_w: w, orig_h: h }
                } else {
                    DragState::Moving { id, grab_dx: pt.x - x, grab_dy: pt.y - y, orig_w: w, orig_h: h }
                };
                actions.push(Action::RenderNeeded);
            }
            Some((None, ..)) => {
                // Draft not yet acknowledged by the remote store; nothing to
                // select or drag.
            }
            None => {
                self.ui.selected_id = None;
                self.drag = DragState::Idle;
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    /// Pointer move: apply the active gesture's geometry update, or surface
    /// the hover affordance while idle.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match self.drag.clone() {
            DragState::Idle => {
                let cursor = match geom::room_at(self.store.rooms(), pt) {
                    Some(room) if geom::on_resize_handle(room, pt) => Cursor::ResizeNwse,
                    Some(_) => Cursor::Move,
                    None => Cursor::Default,
                };
                actions.push(Action::SetCursor(cursor));
            }
            DragState::Moving { id, grab_dx, grab_dy, orig_w, orig_h } => {
                let x = (pt.x - grab_dx).min(CANVAS_WIDTH - orig_w).max(0.0);
                let y = (pt.y - grab_dy).min(CANVAS_HEIGHT - orig_h).max(0.0);
                let patch = RoomPatch { x: Some(x), y: Some(y), ..RoomPatch::default() };
                if self.store.update(&id, &patch) {
                    actions.push(Action::RoomEdited(id));
                    actions.push(Action::RenderNeeded);
                }
            }
            DragState::Resizing { id, anchor, orig_w, orig_h } => {
                let Some((x, y)) = self.store.get(&id).map(|r| (r.x, r.y)) else {
                    return actions;
                };
                let mut w = (orig_w + (pt.x - anchor.x)).max(MIN_ROOM_WIDTH);
                let mut h = (orig_h + (pt.y - anchor.y)).max(MIN_ROOM_HEIGHT);
                // Clamp against the current origin so a resize can never push
                // the room off-canvas; the origin itself never moves.
                w = w.min(CANVAS_WIDTH - x);
                h = h.min(CANVAS_HEIGHT - y);
                if self.config.resize_clamp == ResizeClampPolicy::MinSizeWins {
                    w = w.max(MIN_ROOM_WIDTH);
                    h = h.max(MIN_ROOM_HEIGHT);
                }
                let patch = RoomPatch { w: Some(w), h: Some(h), ..RoomPatch::default() };
                if self.store.update(&id, &patch) {
                    actions.push(Action::RoomEdited(id));
                    actions.push(Action::RenderNeeded);
                }
            }
        }
        actions
    }

    /// Pointer release ends any active gesture, wherever it occurs.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.drag = DragState::Idle;
        Vec::new()
    }

    /// Secondary click: open the context menu on a room, or close an open
    /// menu on empty canvas (selection is left untouched in that case).
    pub fn on_context_menu(&mut self, pt: Point) -> Vec<Action> {
        let hit = geom::room_at(self.store.rooms(), pt).and_then(|room| room.id.clone());
        match hit {
            Some(id) => {
                self.ui.selected_id = Some(id.clone());
                self.ui.menu = Some(ContextMenu { anchor: pt, target: id });
                vec![Action::RenderNeeded]
            }
            None => {
                if self.ui.menu.take().is_some() {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
        }
    }

    // --- Menu actions ---

    /// Rename a room. The label is trimmed; an empty result is ignored, as
    /// is a target that no longer exists.
    pub fn rename(&mut self, id: &RoomId, label: &str) -> Vec<Action> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let patch = RoomPatch { label: Some(trimmed.to_owned()), ..RoomPatch::default() };
        if self.store.update(id, &patch) {
            vec![Action::RoomEdited(id.clone()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Change a room's fill color. A target that no longer exists is ignored.
    pub fn recolor(&mut self, id: &RoomId, color: &str) -> Vec<Action> {
        let patch = RoomPatch { color: Some(color.to_owned()), ..RoomPatch::default() };
        if self.store.update(id, &patch) {
            vec![Action::RoomEdited(id.clone()), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The currently selected room, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&RoomId> {
        self.ui.selected_id.as_ref()
    }

    /// The open context menu, if any.
    #[must_use]
    pub fn menu(&self) -> Option<&ContextMenu> {
        self.ui.menu.as_ref()
    }

    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.store.get(id)
    }
}
