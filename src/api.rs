//! HTTP client for the remote room store.
//!
//! Thin wrapper over the CRUD contract: list, create, update, delete one,
//! delete all. No retries live here — a failure surfaces as [`ApiError`]
//! and the caller decides what happens to local state.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use crate::room::{Room, RoomId};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Failures from the remote store.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: the store could not be reached, or its
    /// response could not be decoded.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
    /// The store no longer knows the addressed resource.
    #[error("not found: {0}")]
    NotFound(String),
    /// The store rejected the request (malformed geometry or label, etc.).
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Client for a room CRUD collection.
#[derive(Clone)]
pub struct RoomsApi {
    http: reqwest::Client,
    base_url: String,
}

impl RoomsApi {
    /// Build a client for the collection at `base_url` (no trailing slash).
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into() })
    }

    /// `GET` the full collection, applying display defaults to each room.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn list(&self) -> Result<Vec<Room>, ApiError> {
        let resp = self.http.get(&self.base_url).send().await.map_err(transport)?;
        let resp = ok_or_api_error(resp, "rooms").await?;
        let rooms: Vec<Room> = resp.json().await.map_err(transport)?;
        Ok(rooms.into_iter().map(Room::normalized).collect())
    }

    /// `POST` a draft room (no id) and return the canonical created entity.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decode failure.
    pub async fn create(&self, draft: &Room) -> Result<Room, ApiError> {
        let resp = self
            .http
            .post(&self.base_url)
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        let resp = ok_or_api_error(resp, "rooms").await?;
        let created: Room = resp.json().await.map_err(transport)?;
        Ok(created.normalized())
    }

    /// `PUT` a room's full current state. The response body is ignored.
    ///
    /// # Errors
    ///
    /// `NotFound` if the store no longer has `id`; any transport or status
    /// failure otherwise.
    pub async fn update(&self, id: &RoomId, room: &Room) -> Result<(), ApiError> {
        let url = format!("{}/{id}", self.base_url);
        let resp = self.http.put(&url).json(room).send().await.map_err(transport)?;
        ok_or_api_error(resp, id.as_str()).await?;
        Ok(())
    }

    /// `DELETE` a single room.
    ///
    /// # Errors
    ///
    /// `NotFound` if the store no longer has `id`; any transport or status
    /// failure otherwise.
    pub async fn delete(&self, id: &RoomId) -> Result<(), ApiError> {
        let url = format!("{}/{id}", self.base_url);
        let resp = self.http.delete(&url).send().await.map_err(transport)?;
        ok_or_api_error(resp, id.as_str()).await?;
        Ok(())
    }

    /// `DELETE` the whole collection.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn delete_all(&self) -> Result<(), ApiError> {
        let resp = self.http.delete(&self.base_url).send().await.map_err(transport)?;
        ok_or_api_error(resp, "rooms").await?;
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Unavailable(e.to_string())
}

/// Map a non-success status to the matching [`ApiError`], passing success
/// responses through for body decoding.
async fn ok_or_api_error(resp: reqwest::Response, resource: &str) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(resource.to_owned()));
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Rejected { status: status.as_u16(), body })
}
