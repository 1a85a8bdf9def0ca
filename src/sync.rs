//! Persistence synchronizer — debounced write-through to the remote store.
//!
//! DESIGN
//! ======
//! Geometry edits arrive on every pointer move; a PUT per pixel would flood
//! the store for nothing. Each edited room gets its own debounce task keyed
//! by id: the task sleeps for the configured quiet period, reads the room's
//! state at fire time, and issues one PUT. Rescheduling within the window
//! aborts and replaces that room's task only, so edits to different rooms
//! inside one window all persist. Creation and deletion are synchronous
//! with the caller and never debounced.
//!
//! ERROR HANDLING
//! ==============
//! Create, delete, clear, and reload propagate `ApiError` untouched, and
//! local state is mutated only after the remote call succeeds. Debounced
//! updates are fire-and-forget: local state already reflects the edit, a
//! failed PUT is logged and dropped, and the resulting local/remote
//! divergence lasts until the next reload. That window is the price of
//! keeping drags responsive.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, RoomsApi};
use crate::consts::{DRAFT_FILL, DRAFT_H, DRAFT_LABEL, DRAFT_W, DRAFT_X, DRAFT_Y, SAVE_DEBOUNCE_MS};
use crate::engine::EditorCore;
use crate::room::{Room, RoomId};

/// Shared handle to the editor state. Locked per mutation, never across a
/// network await, so drags keep updating local state while a save is in
/// flight.
pub type SharedEditor = Arc<RwLock<EditorCore>>;

/// Parse an environment variable, falling back to `default` on absence or
/// parse failure.
#[must_use]
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(v) => v.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Tuning knobs for the synchronizer.
#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Quiet period before a scheduled save fires.
    pub debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(SAVE_DEBOUNCE_MS) }
    }
}

/// Confirmation seam for destructive bulk operations.
pub trait ConfirmPrompt {
    /// Ask the user to confirm; `false` aborts the operation before any
    /// network or local change.
    fn confirm(&self, message: &str) -> bool;
}

/// Debounces and dispatches CRUD operations against the remote store,
/// reconciling optimistic local state with server-assigned identity.
pub struct Synchronizer {
    api: RoomsApi,
    editor: SharedEditor,
    config: SyncConfig,
    pending: HashMap<RoomId, JoinHandle<()>>,
    /// Bumped at the start of every authoritative resync. A resync response
    /// that observes a newer value than the one it started with lost the
    /// race and is discarded.
    generation: Arc<AtomicU64>,
}

impl Synchronizer {
    #[must_use]
    pub fn new(api: RoomsApi, editor: SharedEditor, config: SyncConfig) -> Self {
        Self {
            api,
            editor,
            config,
            pending: HashMap::new(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedule a debounced save of `id`'s current state.
    ///
    /// Rescheduling within the quiet period cancels and replaces this room's
    /// pending save only; other rooms' timers are untouched. The PUT carries
    /// the room's state as read at fire time, not at schedule time. Only
    /// rooms that already carry a remote id reach this path — creation is
    /// synchronous and never debounced.
    pub fn schedule_save(&mut self, id: &RoomId) {
        if let Some(prev) = self.pending.remove(id) {
            prev.abort();
        }
        let api = self.api.clone();
        let editor = Arc::clone(&self.editor);
        let room_id = id.clone();
        let debounce = self.config.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let room = {
                let core = editor.read().await;
                core.store.get(&room_id).cloned()
            };
            let Some(room) = room else {
                debug!(room = %room_id, "debounced save skipped; room gone");
                return;
            };
            if let Err(e) = api.update(&room_id, &room).await {
                warn!(room = %room_id, error = %e, "debounced save failed; keeping local state");
            }
        });
        self.pending.insert(id.clone(), handle);
    }

    /// Number of rooms with a save currently pending.
    #[must_use]
    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }

    /// Create the default draft room remotely, insert the canonical result
    /// into the store, and select it.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the store is left untouched.
    pub async fn create_room(&mut self) -> Result<RoomId, ApiError> {
        let draft = Room {
            id: None,
            x: DRAFT_X,
            y: DRAFT_Y,
            w: DRAFT_W,
            h: DRAFT_H,
            label: DRAFT_LABEL.to_owned(),
            color: DRAFT_FILL.to_owned(),
        };
        let created = self.api.create(&draft).await?;
        let Some(id) = created.id.clone() else {
            return Err(ApiError::Unavailable("create response carried no room id".to_owned()));
        };
        let mut core = self.editor.write().await;
        core.insert_room(created);
        info!(room = %id, "room created");
        Ok(id)
    }

    /// Delete a room remotely, then locally. Clears selection and the
    /// context menu if they referenced it.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the room stays in the store.
    pub async fn delete_room(&mut self, id: &RoomId) -> Result<(), ApiError> {
        if let Some(pending) = self.pending.remove(id) {
            pending.abort();
        }
        self.api.delete(id).await?;
        let mut core = self.editor.write().await;
        core.remove_room(id);
        info!(room = %id, "room deleted");
        Ok(())
    }

    /// Delete every room, after interactive confirmation.
    ///
    /// Returns `Ok(false)` without any remote or local change if the prompt
    /// declines.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the store is left untouched.
    pub async fn clear_all(&mut self, prompt: &dyn ConfirmPrompt) -> Result<bool, ApiError> {
        if !prompt.confirm("Clear all rooms?") {
            return Ok(false);
        }
        self.cancel_pending();
        let generation = self.bump_generation();
        self.api.delete_all().await?;
        if !self.generation_current(generation) {
            debug!("clear superseded by a newer resync; local apply skipped");
            return Ok(true);
        }
        let mut core = self.editor.write().await;
        core.clear();
        info!("all rooms cleared");
        Ok(true)
    }

    /// Fetch canonical remote state and replace the local store with it,
    /// clearing selection and any open menu. Discards local-only optimism;
    /// any pending debounced saves are cancelled first.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the store is left untouched.
    pub async fn reload_all(&mut self) -> Result<(), ApiError> {
        self.cancel_pending();
        let generation = self.bump_generation();
        let rooms = self.api.list().await?;
        if !self.apply_snapshot_if_current(generation, rooms).await {
            debug!("reload superseded by a newer resync; snapshot discarded");
        }
        Ok(())
    }

    /// Apply a fetched snapshot unless a newer resync has started since
    /// `generation` was claimed. Returns whether the snapshot was applied.
    async fn apply_snapshot_if_current(&self, generation: u64, rooms: Vec<Room>) -> bool {
        if !self.generation_current(generation) {
            return false;
        }
        let mut core = self.editor.write().await;
        core.replace_all(rooms);
        info!(rooms = core.store.len(), "reloaded from remote store");
        true
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn generation_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Cancel every pending debounced save.
    fn cancel_pending(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
