use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventPayload};
use crate::AppState;

pub const DELETED_MESSAGE: &str = "Evento eliminado correctamente";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", put(update_event).delete(delete_event))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Malformed bodies are reported like any other validation failure.
fn body(payload: Result<Json<EventPayload>, JsonRejection>) -> EventResult<EventPayload> {
    let Json(payload) = payload?;
    Ok(payload)
}

/// Ids that are not integers cannot match a row.
fn parse_id(raw: &str) -> EventResult<i64> {
    raw.parse().map_err(|_| EventError::NotFound)
}

// GET /events
async fn list_events(State(state): State<Arc<AppState>>) -> EventResult<Json<EventsResponse>> {
    let events = state.store.list().await?;
    Ok(Json(EventsResponse { events }))
}

// POST /events
async fn create_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> EventResult<impl IntoResponse> {
    let payload = body(payload)?;
    debug!("Create event request: {:?}", payload);
    let event = state.store.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

// PUT /events/{id}
async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> EventResult<Json<Event>> {
    let payload = body(payload)?;
    debug!("Update event {} request: {:?}", id, payload);
    let id = parse_id(&id)?;
    let event = state.store.update(id, &payload).await?;
    Ok(Json(event))
}

// DELETE /events/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> EventResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}
