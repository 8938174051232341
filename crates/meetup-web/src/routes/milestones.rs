//! Milestone route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use meetup_core::milestone::{
    self,
    model::{Milestone, NewMilestone},
};
use meetup_db::WebSocketMessage;

use crate::error::ApiResult;
use crate::state::AppState;

fn milestone_updated(m: &Milestone) -> WebSocketMessage {
    WebSocketMessage::MilestoneUpdated {
        event_id: m.event_id.clone(),
        milestone_id: m.id.clone(),
    }
}

pub async fn list_milestones(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<Milestone>>> {
    let milestones = state
        .run(move |db, _| milestone::list_milestones(db, &event_id))
        .await?;
    Ok(Json(milestones))
}

pub async fn create_milestone(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<NewMilestone>,
) -> ApiResult<(StatusCode, Json<Milestone>)> {
    let m = state
        .run(move |db, _| milestone::create_milestone(db, &event_id, req))
        .await?;
    state.broadcast(milestone_updated(&m));
    Ok((StatusCode::CREATED, Json(m)))
}

pub async fn complete_milestone(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Milestone>> {
    let m = state.run(move |db, _| milestone::complete_milestone(db, &id)).await?;
    state.broadcast(milestone_updated(&m));
    Ok(Json(m))
}

pub async fn reopen_milestone(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Milestone>> {
    let m = state.run(move |db, _| milestone::reopen_milestone(db, &id)).await?;
    state.broadcast(milestone_updated(&m));
    Ok(Json(m))
}

pub async fn delete_milestone(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let m = state
        .run(move |db, _| {
            let m = milestone::get_milestone(db, &id)?;
            milestone::delete_milestone(db, &id)?;
            Ok(m)
        })
        .await?;
    state.broadcast(milestone_updated(&m));
    Ok(StatusCode::NO_CONTENT)
}
