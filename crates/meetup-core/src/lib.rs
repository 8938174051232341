//! Meetup Planner Core Library
//!
//! Domain models and business logic: events, the kanban task board,
//! milestones, and the workflow-progress engine that turns them into a
//! read-only progress snapshot.

pub mod config;
pub mod error;
pub mod event;
pub mod milestone;
pub mod task;
pub mod timestamp;
pub mod validate;
pub mod workflow;

pub use config::{Settings, WorkflowConfig};
pub use error::{PlannerError, PlannerResult};
