//! Meetup Planner Web Server
//!
//! JSON API over the planner core plus a WebSocket feed of change
//! notifications.

pub mod error;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    routing::{get, post},
    Json, Router,
};
use meetup_core::WorkflowConfig;
use meetup_db::DbPool;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Events
        .route("/events", get(routes::events::list_events).post(routes::events::create_event))
        .route(
            "/events/{id}",
            get(routes::events::get_event)
                .put(routes::events::update_event)
                .delete(routes::events::delete_event),
        )
        // Tasks
        .route("/events/{id}/tasks", get(routes::tasks::list_tasks).post(routes::tasks::create_task))
        .route("/events/{id}/board", get(routes::tasks::get_board))
        .route(
            "/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/tasks/{id}/move", post(routes::tasks::move_task))
        .route("/tasks/{id}/block", post(routes::tasks::block_task))
        .route("/tasks/{id}/unblock", post(routes::tasks::unblock_task))
        // Milestones
        .route(
            "/events/{id}/milestones",
            get(routes::milestones::list_milestones).post(routes::milestones::create_milestone),
        )
        .route("/milestones/{id}", axum::routing::delete(routes::milestones::delete_milestone))
        .route("/milestones/{id}/complete", post(routes::milestones::complete_milestone))
        .route("/milestones/{id}/reopen", post(routes::milestones::reopen_milestone))
        // Workflow
        .route("/events/{id}/workflow/init", post(routes::workflow::initialize))
        .route("/events/{id}/progress", get(routes::workflow::get_progress))
        .route("/events/{id}/timeline", get(routes::workflow::get_timeline))
        .route("/events/{id}/suggestions", get(routes::workflow::get_suggestions))
        .route("/events/{id}/analysis", get(routes::workflow::get_analysis))
        .route("/templates", get(routes::workflow::list_templates))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Run the web server until it is stopped.
pub async fn run_server(db: Arc<DbPool>, config: WorkflowConfig, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db, config);
    let app = create_router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
