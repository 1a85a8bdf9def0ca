//! In-process mock of the remote room store, for `api` and `sync` tests.
//!
//! Implements the CRUD contract over an in-memory vector, mints string ids,
//! and records every request so tests can assert on call counts and
//! payloads.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use tokio::sync::Mutex;

use crate::room::{Room, RoomId};

/// One observed request, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    List,
    Create,
    Update { id: String, room: Room },
    DeleteOne { id: String },
    DeleteAll,
}

#[derive(Default)]
struct StoreInner {
    rooms: Vec<Room>,
    log: Vec<Observed>,
}

/// Handle to the mock's state, shared with the running server.
#[derive(Clone, Default)]
pub struct MockStore(Arc<Mutex<StoreInner>>);

impl MockStore {
    /// Current remote-side rooms.
    pub async fn rooms(&self) -> Vec<Room> {
        self.0.lock().await.rooms.clone()
    }

    /// Every request observed so far.
    pub async fn log(&self) -> Vec<Observed> {
        self.0.lock().await.log.clone()
    }

    /// Number of PUTs observed for `id`.
    pub async fn update_count(&self, id: &RoomId) -> usize {
        self.0
            .lock()
            .await
            .log
            .iter()
            .filter(|o| matches!(o, Observed::Update { id: seen, .. } if seen == id.as_str()))
            .count()
    }

    /// The body of the most recent PUT for `id`, if any.
    pub async fn last_update(&self, id: &RoomId) -> Option<Room> {
        self.0
            .lock()
            .await
            .log
            .iter()
            .rev()
            .find_map(|o| match o {
                Observed::Update { id: seen, room } if seen == id.as_str() => Some(room.clone()),
                _ => None,
            })
    }

    /// Insert a room server-side, assigning an id if the room has none.
    /// Returns the id.
    pub async fn seed(&self, mut room: Room) -> RoomId {
        let id = room
            .id
            .clone()
            .unwrap_or_else(|| RoomId::new(uuid::Uuid::new_v4().to_string()));
        room.id = Some(id.clone());
        self.0.lock().await.rooms.push(room);
        id
    }

    /// Drop a room server-side without going through the HTTP surface.
    pub async fn evict(&self, id: &RoomId) {
        let mut inner = self.0.lock().await;
        inner.rooms.retain(|r| r.id.as_ref() != Some(id));
    }
}

/// Start the mock on an ephemeral port. Returns the store handle and the
/// collection base URL.
pub async fn spawn_mock_store() -> (MockStore, String) {
    let store = MockStore::default();
    let app = Router::new()
        .route("/api/rooms", get(list).post(create).delete(delete_all))
        .route("/api/rooms/{id}", axum::routing::put(update).delete(delete_one))
        .with_state(store.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock store");
    let addr = listener.local_addr().expect("mock store addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock store serve");
    });
    (store, format!("http://{addr}/api/rooms"))
}

async fn list(State(store): State<MockStore>) -> Json<Vec<Room>> {
    let mut inner = store.0.lock().await;
    inner.log.push(Observed::List);
    Json(inner.rooms.clone())
}

async fn create(State(store): State<MockStore>, Json(mut room): Json<Room>) -> Json<Room> {
    let mut inner = store.0.lock().await;
    room.id = Some(RoomId::new(uuid::Uuid::new_v4().to_string()));
    inner.rooms.push(room.clone());
    inner.log.push(Observed::Create);
    Json(room)
}

async fn update(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    Json(room): Json<Room>,
) -> StatusCode {
    let mut inner = store.0.lock().await;
    inner.log.push(Observed::Update { id: id.clone(), room: room.clone() });
    match inner
        .rooms
        .iter_mut()
        .find(|r| r.id.as_ref().is_some_and(|rid| rid.as_str() == id))
    {
        Some(existing) => {
            *existing = room;
            StatusCode::OK
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_one(State(store): State<MockStore>, Path(id): Path<String>) -> StatusCode {
    let mut inner = store.0.lock().await;
    inner.log.push(Observed::DeleteOne { id: id.clone() });
    let before = inner.rooms.len();
    inner.rooms.retain(|r| r.id.as_ref().is_none_or(|rid| rid.as_str() != id));
    if inner.rooms.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn delete_all(State(store): State<MockStore>) -> StatusCode {
    let mut inner = store.0.lock().await;
    inner.log.push(Observed::DeleteAll);
    inner.rooms.clear();
    StatusCode::NO_CONTENT
}
