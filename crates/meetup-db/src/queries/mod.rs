//! Database query implementations.

pub mod events;
pub mod milestones;
pub mod tasks;
