//! Event API endpoints
//!
//! - `POST /events` - create an event
//! - `GET /events` - list events, filtered by `activity`, `location`, `date`
//! - `GET /events/:id` - fetch one event
//! - `PUT /events/:id` - partial update
//! - `DELETE /events/:id` - delete an event
//! - `POST /events/:id/join` - join as attendee

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use crate::handlers::extract::{EventId, EventQueryParams, JsonBody};
use crate::models::event::{CreateEventRequest, EventResponse, JoinEventRequest, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::errors::EventHubError;

/// Create a new event
///
/// ```bash
/// curl -X POST http://localhost:3000/events \
///   -H "Content-Type: application/json" \
///   -d '{"activity":"Morning Run","date":"2024-05-01T10:00:00Z","location":"Riverside Park","instagramUsername":"runner_ana","capacity":10}'
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), EventHubError> {
    let event = state.events.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event.to_response())))
}

/// List events, earliest first
pub async fn list_events(
    State(state): State<AppState>,
    EventQueryParams(query): EventQueryParams,
) -> Result<Json<Vec<EventResponse>>, EventHubError> {
    let events = state.events.list_events(&query).await?;
    Ok(Json(events.iter().map(EventResponse::from).collect()))
}

pub async fn get_event(
    State(state): State<AppState>,
    EventId(id): EventId,
) -> Result<Json<EventResponse>, EventHubError> {
    let event = state.events.get_event(id).await?;
    Ok(Json(event.to_response()))
}

pub async fn update_event(
    State(state): State<AppState>,
    EventId(id): EventId,
    JsonBody(request): JsonBody<UpdateEventRequest>,
) -> Result<Json<EventResponse>, EventHubError> {
    let event = state.events.update_event(id, request).await?;
    Ok(Json(event.to_response()))
}

pub async fn delete_event(
    State(state): State<AppState>,
    EventId(id): EventId,
) -> Result<StatusCode, EventHubError> {
    state.events.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Join an event
///
/// Responds 409 when the handle already joined or the event is full.
pub async fn join_event(
    State(state): State<AppState>,
    EventId(id): EventId,
    JsonBody(request): JsonBody<JoinEventRequest>,
) -> Result<Json<EventResponse>, EventHubError> {
    let event = state.events.join_event(id, request).await?;
    Ok(Json(event.to_response()))
}
