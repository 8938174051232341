//! Progress aggregation.
//!
//! Turns one fetch of an event's tasks and milestones into a
//! [`WorkflowProgress`] snapshot. Everything here is pure: the caller
//! supplies `now`, so the same input always yields the same snapshot.

use chrono::{DateTime, Utc};

use super::model::{Blocker, NextMilestone, PhaseProgress, TaskCounts, WorkflowProgress};
use super::suggestions::{self, RuleContext};
use super::Phase;
use crate::config::WorkflowConfig;
use crate::event::model::Event;
use crate::milestone::model::Milestone;
use crate::milestone::tracker;
use crate::task::model::{Task, TaskStatus};

/// Everything the aggregator reads.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInput<'a> {
    pub event: &'a Event,
    pub tasks: &'a [Task],
    pub milestones: &'a [Milestone],
    pub now: DateTime<Utc>,
}

/// Build the snapshot.
pub fn aggregate(input: ProgressInput<'_>, config: &WorkflowConfig) -> WorkflowProgress {
    let ProgressInput { event, tasks, milestones, now } = input;

    let mut phases: Vec<PhaseProgress> = Phase::ALL
        .iter()
        .map(|phase| phase_progress(*phase, tasks, config))
        .collect();

    let overall_percent: f64 = phases
        .iter()
        .map(|p| p.progress_percent * f64::from(p.weight) / 100.0)
        .sum();

    let current_phase = phases
        .iter()
        .find(|p| !p.is_completed)
        .map_or(Phase::Review, |p| p.phase);
    for p in &mut phases {
        p.is_active = p.phase == current_phase && !p.is_completed;
    }

    let days_until_event = event.days_until(now);
    let is_on_track = on_track(event, overall_percent, days_until_event, now, config);

    let blockers = tasks
        .iter()
        .filter(|t| t.is_blocked)
        .map(|t| Blocker {
            task_id: t.id.clone(),
            title: t.title.clone(),
            phase: t.phase,
            reason: t.blocking_reason.clone().unwrap_or_default(),
        })
        .collect();

    let counts = count_tasks(tasks, now);
    let timeline = tracker::track(milestones.to_vec(), event.scheduled_date, now);
    let next = timeline.next_upcoming();

    let suggestions = suggestions::evaluate(
        &RuleContext {
            phases: &phases,
            tasks,
            counts: &counts,
            days_until_event,
            next_milestone: next,
        },
        config,
    );

    let next_milestone = next.map(|e| NextMilestone {
        id: e.milestone.id.clone(),
        title: e.milestone.title.clone(),
        due_date: e.milestone.due_date,
        days_until_due: e.days_until_due,
    });

    WorkflowProgress {
        event_id: event.id.clone(),
        overall_percent,
        current_phase,
        is_on_track,
        phases,
        blockers,
        suggestions,
        tasks: counts,
        days_until_event,
        total_milestones: timeline.total,
        completed_milestones: timeline.completed,
        next_milestone,
        generated_at: now,
    }
}

fn phase_progress(phase: Phase, tasks: &[Task], config: &WorkflowConfig) -> PhaseProgress {
    let in_phase: Vec<&Task> = tasks.iter().filter(|t| t.phase == Some(phase)).collect();
    let total = in_phase.len();
    let done = in_phase.iter().filter(|t| t.status == TaskStatus::Done).count();
    let review = in_phase.iter().filter(|t| t.status == TaskStatus::Review).count();

    // An empty phase is not started, never complete.
    let progress_percent = if total == 0 {
        0.0
    } else {
        let credited = done as f64 + review as f64 * config.review_credit();
        (100.0 * credited / total as f64).min(100.0)
    };

    PhaseProgress {
        phase,
        name: phase.display_name().to_string(),
        weight: config.weight(phase),
        completed_task_count: done,
        total_task_count: total,
        progress_percent,
        is_active: false,
        is_completed: total > 0 && progress_percent >= 100.0,
        has_blocked_tasks: in_phase.iter().any(|t| t.is_blocked),
    }
}

/// Schedule-pressure check: inside the at-risk window, progress must keep up
/// with the share of planning time already used.
fn on_track(
    event: &Event,
    overall_percent: f64,
    days_until_event: Option<i64>,
    now: DateTime<Utc>,
    config: &WorkflowConfig,
) -> bool {
    let (Some(date), Some(days_left)) = (event.scheduled_date, days_until_event) else {
        return true;
    };
    if days_left >= config.at_risk_days() {
        return true;
    }

    let target = elapsed_fraction(event.created_at, date, now) * 100.0 * config.on_track_tolerance();
    overall_percent >= target
}

/// Share of the planning window (creation to event date) already elapsed, 0.0..=1.0.
pub fn elapsed_fraction(created: DateTime<Utc>, date: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let window = (date - created).num_seconds();
    if window <= 0 {
        return 1.0;
    }
    let elapsed = (now - created).num_seconds() as f64;
    (elapsed / window as f64).clamp(0.0, 1.0)
}

fn count_tasks(tasks: &[Task], now: DateTime<Utc>) -> TaskCounts {
    let mut counts = TaskCounts {
        total: tasks.len(),
        ..TaskCounts::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Review => counts.review += 1,
            TaskStatus::Done => counts.done += 1,
        }
        if task.is_blocked {
            counts.blocked += 1;
        }
        if task.is_overdue(now) {
            counts.overdue += 1;
        }
        if task.phase.is_none() {
            counts.unclassified += 1;
        }
    }
    counts
}
