//! Task route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use meetup_core::task::{
    self,
    model::{Board, NewTask, Task, TaskStatus, TaskUpdate},
};
use meetup_db::WebSocketMessage;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
pub struct BlockTaskRequest {
    pub reason: String,
}

fn task_updated(task: &Task) -> WebSocketMessage {
    WebSocketMessage::TaskUpdated {
        event_id: task.event_id.clone(),
        task_id: task.id.clone(),
        status: task.status.as_str().to_string(),
    }
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(filter): Query<TaskFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .run(move |db, _| task::list_tasks(db, &event_id, filter.status))
        .await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state.run(move |db, _| task::create_task(db, &event_id, req)).await?;
    state.broadcast(WebSocketMessage::BoardRefresh {
        event_id: task.event_id.clone(),
    });
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_board(State(state): State<AppState>, Path(event_id): Path<String>) -> ApiResult<Json<Board>> {
    let board = state.run(move |db, _| task::get_board(db, &event_id)).await?;
    Ok(Json(board))
}

pub async fn get_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Task>> {
    let task = state.run(move |db, _| task::get_task(db, &id)).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let task = state.run(move |db, _| task::update_task(db, &id, req)).await?;
    state.broadcast(task_updated(&task));
    Ok(Json(task))
}

pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MoveTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.run(move |db, _| task::move_task(db, &id, req.status)).await?;
    state.broadcast(task_updated(&task));
    Ok(Json(task))
}

pub async fn block_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<BlockTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.run(move |db, _| task::block_task(db, &id, &req.reason)).await?;
    state.broadcast(task_updated(&task));
    Ok(Json(task))
}

pub async fn unblock_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Task>> {
    let task = state.run(move |db, _| task::unblock_task(db, &id)).await?;
    state.broadcast(task_updated(&task));
    Ok(Json(task))
}

pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let event_id = state
        .run(move |db, _| {
            let task = task::get_task(db, &id)?;
            task::delete_task(db, &id)?;
            Ok(task.event_id)
        })
        .await?;
    state.broadcast(WebSocketMessage::BoardRefresh { event_id });
    Ok(StatusCode::NO_CONTENT)
}
