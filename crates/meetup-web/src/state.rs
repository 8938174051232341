//! Application state.

use axum::http::StatusCode;
use meetup_core::{PlannerResult, WorkflowConfig};
use meetup_db::{create_broadcast_channel, BroadcastSender, DbPool, WebSocketMessage};
use std::sync::Arc;

use crate::error::{api_error, ApiError};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<WorkflowConfig>,
    pub tx: BroadcastSender,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: WorkflowConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            tx: create_broadcast_channel(),
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }

    /// Run a planner call on the blocking pool. SQLite access is synchronous.
    pub async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool, &WorkflowConfig) -> PlannerResult<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let config = Arc::clone(&self.config);
        tokio::task::spawn_blocking(move || f(&db, &config))
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
            .map_err(api_error)
    }
}
