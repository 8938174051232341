//! Workflow snapshot types. Computed on demand, never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Phase;

/// Progress of one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub phase: Phase,
    pub name: String,
    pub weight: u32,
    pub completed_task_count: usize,
    pub total_task_count: usize,
    /// 0.0..=100.0
    pub progress_percent: f64,
    pub is_active: bool,
    pub is_completed: bool,
    pub has_blocked_tasks: bool,
}

/// A blocked task surfaced in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blocker {
    pub task_id: String,
    pub title: String,
    pub phase: Option<Phase>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Tip,
}

/// One templated suggestion produced by the rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Stable identifier of the rule that fired.
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

/// Task totals by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub review: usize,
    pub done: usize,
    pub blocked: usize,
    pub overdue: usize,
    /// Tasks whose phase is not one of the six known phases.
    pub unclassified: usize,
}

/// The next milestone still ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMilestone {
    pub id: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub days_until_due: i64,
}

/// Read-only progress snapshot for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowProgress {
    pub event_id: String,
    pub overall_percent: f64,
    pub current_phase: Phase,
    pub is_on_track: bool,
    pub phases: Vec<PhaseProgress>,
    pub blockers: Vec<Blocker>,
    pub suggestions: Vec<Suggestion>,
    pub tasks: TaskCounts,
    pub days_until_event: Option<i64>,
    pub total_milestones: usize,
    pub completed_milestones: usize,
    pub next_milestone: Option<NextMilestone>,
    pub generated_at: DateTime<Utc>,
}

impl WorkflowProgress {
    /// Progress entry for one phase.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseProgress> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}
