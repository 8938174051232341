//! Meetup Planner Database Layer
//!
//! SQLite persistence for events, tasks and milestones. Every query is a
//! plain function over a shared [`DbPool`]; domain types live in
//! `meetup-core`.

pub mod broadcast;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use broadcast::{BroadcastReceiver, BroadcastSender, WebSocketMessage, create_broadcast_channel};
pub use pool::{DbError, DbPool, DbResult};

use std::path::Path;

/// Open (or create) the database file and bring its schema up to date.
pub fn init_pool(db_path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(db_path)?;
    migrations::run_migrations(&pool)?;
    tracing::debug!(path = %db_path.display(), "Database ready");
    Ok(pool)
}

/// In-memory database with the schema applied. Used by tests across the workspace.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool)?;
    Ok(pool)
}
