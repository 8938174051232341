//! Event route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use meetup_core::event::{
    self,
    model::{Event, EventStatus, EventUpdate, NewEvent},
};
use meetup_db::WebSocketMessage;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<EventStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state
        .run(move |db, _| event::list_events(db, query.status, query.limit, query.offset))
        .await?;
    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEvent>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = state.run(move |db, _| event::create_event(db, req)).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Event>> {
    let event = state.run(move |db, _| event::get_event(db, &id)).await?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EventUpdate>,
) -> ApiResult<Json<Event>> {
    let event = state.run(move |db, _| event::update_event(db, &id, req)).await?;
    state.broadcast(WebSocketMessage::EventUpdated {
        event_id: event.id.clone(),
    });
    Ok(Json(event))
}

pub async fn delete_event(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let event_id = id.clone();
    state.run(move |db, _| event::delete_event(db, &id)).await?;
    state.broadcast(WebSocketMessage::EventUpdated { event_id });
    Ok(StatusCode::NO_CONTENT)
}
