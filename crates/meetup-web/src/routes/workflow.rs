//! Workflow progress handlers. All read-only except init.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use meetup_core::milestone::tracker::MilestoneTimeline;
use meetup_core::workflow::{
    self,
    health::WorkflowAnalysis,
    model::{Suggestion, WorkflowProgress},
    templates::{self, TemplateCatalog},
    WorkflowInit,
};
use meetup_db::WebSocketMessage;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InitQuery {
    /// Also seed the starter task checklist. Defaults to true.
    pub seed_tasks: Option<bool>,
}

pub async fn initialize(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<InitQuery>,
) -> ApiResult<(StatusCode, Json<WorkflowInit>)> {
    let seed_tasks = query.seed_tasks.unwrap_or(true);
    let init = state
        .run(move |db, _| workflow::initialize_workflow(db, &event_id, seed_tasks))
        .await?;
    state.broadcast(WebSocketMessage::BoardRefresh {
        event_id: init.event_id.clone(),
    });
    Ok((StatusCode::CREATED, Json(init)))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<WorkflowProgress>> {
    let progress = state
        .run(move |db, config| workflow::calculate_progress(db, config, &event_id, Utc::now()))
        .await?;
    Ok(Json(progress))
}

pub async fn get_timeline(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<MilestoneTimeline>> {
    let timeline = state
        .run(move |db, _| workflow::milestone_timeline(db, &event_id, Utc::now()))
        .await?;
    Ok(Json(timeline))
}

pub async fn get_suggestions(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<Suggestion>>> {
    let suggestions = state
        .run(move |db, config| workflow::list_suggestions(db, config, &event_id, Utc::now()))
        .await?;
    Ok(Json(suggestions))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<WorkflowAnalysis>> {
    let analysis = state
        .run(move |db, config| workflow::analyze(db, config, &event_id, Utc::now()))
        .await?;
    Ok(Json(analysis))
}

pub async fn list_templates() -> Json<TemplateCatalog> {
    Json(templates::catalog())
}
