//! Room entities and the in-memory store.
//!
//! This module defines the single domain entity (`Room`), its opaque remote
//! identifier (`RoomId`), a sparse-update type for incremental edits
//! (`RoomPatch`), and the runtime store that owns all live rooms
//! (`RoomStore`).
//!
//! Data flows into this layer from the network (JSON deserialization) and
//! from the editor engine (mutations). The renderer reads rooms in insertion
//! order: a room added later draws on top of — and is hit before — any room
//! it overlaps.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_FILL, DEFAULT_LABEL};

/// Opaque identifier assigned by the remote store on creation.
///
/// Stores may issue string or numeric ids; numeric ids are carried in their
/// decimal string form. Ids are never reused and are compared for equality
/// only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RoomId(String);

impl RoomId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl<'v> serde::de::Visitor<'v> for IdVisitor {
            type Value = RoomId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<RoomId, E> {
                Ok(RoomId(v.to_owned()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<RoomId, E> {
                Ok(RoomId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<RoomId, E> {
                Ok(RoomId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// A room as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Remote identifier; `None` until creation has been acknowledged.
    /// Drafts serialize without the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RoomId>,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub w: f64,
    /// Height in canvas pixels.
    pub h: f64,
    /// Display label. The remote store may return it as `null` or omit it;
    /// both arrive here as the empty string (see [`Room::normalized`]).
    #[serde(default, deserialize_with = "null_to_empty")]
    pub label: String,
    /// CSS fill color; same wire tolerance as `label`.
    #[serde(default, deserialize_with = "null_to_empty")]
    pub color: String,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Room {
    /// Apply display defaults for fields the remote store left blank.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.label.is_empty() {
            self.label = DEFAULT_LABEL.to_owned();
        }
        if self.color.is_empty() {
            self.color = DEFAULT_FILL.to_owned();
        }
        self
    }
}

/// Sparse update for a room. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub label: Option<String>,
    pub color: Option<String>,
}

/// In-memory store of rooms, in insertion order (bottom of the draw stack
/// first).
///
/// Every mutating operation completes before it returns, so readers — the
/// renderer and the persistence layer — can never observe a half-applied
/// room.
#[derive(Debug, Default)]
pub struct RoomStore {
    rooms: Vec<Room>,
}

impl RoomStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Vec::new() }
    }

    /// Append a room at the top of the draw order.
    pub fn add(&mut self, room: Room) {
        self.rooms.push(room);
    }

    /// Return a reference to the room with `id`.
    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id.as_ref() == Some(id))
    }

    /// Apply a sparse update to the room with `id`. Returns false if no such
    /// room exists.
    pub fn update(&mut self, id: &RoomId, patch: &RoomPatch) -> bool {
        let Some(room) = self.rooms.iter_mut().find(|r| r.id.as_ref() == Some(id)) else {
            return false;
        };
        if let Some(x) = patch.x {
            room.x = x;
        }
        if let Some(y) = patch.y {
            room.y = y;
        }
        if let Some(w) = patch.w {
            room.w = w;
        }
        if let Some(h) = patch.h {
            room.h = h;
        }
        if let Some(ref label) = patch.label {
            room.label.clone_from(label);
        }
        if let Some(ref color) = patch.color {
            room.color.clone_from(color);
        }
        true
    }

    /// Remove a room by id, returning it if it was present.
    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        let idx = self.rooms.iter().position(|r| r.id.as_ref() == Some(id))?;
        Some(self.rooms.remove(idx))
    }

    /// Replace the whole collection with a remote snapshot, keeping the
    /// snapshot's order.
    pub fn replace_all(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
    }

    /// Drop every room.
    pub fn clear(&mut self) {
        self.rooms.clear();
    }

    /// All rooms in insertion order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the store contains no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
