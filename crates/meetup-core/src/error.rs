//! Centralized error types for the planner.

use meetup_db::DbError;
use thiserror::Error;

/// Main error type for planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(String),

    #[error("Workflow already initialized for event {0}")]
    WorkflowAlreadyInitialized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

impl PlannerError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for the not-found family, regardless of entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_)
                | Self::TaskNotFound(_)
                | Self::MilestoneNotFound(_)
                | Self::Database(DbError::NotFound(_))
        )
    }
}

/// Translate a storage-level "not found" into the entity-specific variant.
pub(crate) fn not_found_as(
    make: impl FnOnce(String) -> PlannerError,
    id: &str,
) -> impl FnOnce(DbError) -> PlannerError {
    let id = id.to_string();
    move |e| match e {
        DbError::NotFound(_) => make(id),
        other => PlannerError::Database(other),
    }
}
