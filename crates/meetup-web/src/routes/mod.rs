//! Route handlers.

pub mod events;
pub mod milestones;
pub mod tasks;
pub mod workflow;
