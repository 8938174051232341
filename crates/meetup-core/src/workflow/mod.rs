//! Workflow progress engine.
//!
//! [`progress::aggregate`] and [`crate::milestone::tracker::track`] are pure
//! functions over already-fetched rows. The functions in this module do the
//! single fetch per call and hand the rows over; nothing is cached.

pub mod health;
pub mod insights;
pub mod model;
pub mod phase;
pub mod progress;
pub mod suggestions;
pub mod templates;

pub use phase::Phase;

use chrono::{DateTime, Utc};
use meetup_db::queries::milestones as milestone_queries;
use meetup_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::config::WorkflowConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::milestone::tracker::{self, MilestoneTimeline};
use crate::{event, milestone, task};
use health::WorkflowAnalysis;
use insights::{InsightContext, InsightKind};
use model::{Suggestion, WorkflowProgress};
use progress::ProgressInput;

/// Progress snapshot for an event as of `now`.
pub fn calculate_progress(
    pool: &DbPool,
    config: &WorkflowConfig,
    event_id: &str,
    now: DateTime<Utc>,
) -> PlannerResult<WorkflowProgress> {
    let event = event::get_event(pool, event_id)?;
    let tasks = task::load_tasks(pool, event_id)?;
    let milestones = milestone::load_milestones(pool, event_id)?;

    let snapshot = progress::aggregate(
        ProgressInput {
            event: &event,
            tasks: &tasks,
            milestones: &milestones,
            now,
        },
        config,
    );
    tracing::debug!(
        event_id = %event_id,
        overall = snapshot.overall_percent,
        phase = %snapshot.current_phase,
        on_track = snapshot.is_on_track,
        "Progress calculated"
    );
    Ok(snapshot)
}

/// Sorted, classified and positioned milestones for an event.
pub fn milestone_timeline(pool: &DbPool, event_id: &str, now: DateTime<Utc>) -> PlannerResult<MilestoneTimeline> {
    let event = event::get_event(pool, event_id)?;
    let milestones = milestone::load_milestones(pool, event_id)?;
    Ok(tracker::track(milestones, event.scheduled_date, now))
}

/// Just the rule-based suggestions.
pub fn list_suggestions(
    pool: &DbPool,
    config: &WorkflowConfig,
    event_id: &str,
    now: DateTime<Utc>,
) -> PlannerResult<Vec<Suggestion>> {
    Ok(calculate_progress(pool, config, event_id, now)?.suggestions)
}

/// Health score, summary and completion forecast.
pub fn analyze(
    pool: &DbPool,
    config: &WorkflowConfig,
    event_id: &str,
    now: DateTime<Utc>,
) -> PlannerResult<WorkflowAnalysis> {
    let event = event::get_event(pool, event_id)?;
    let tasks = task::load_tasks(pool, event_id)?;
    let milestones = milestone::load_milestones(pool, event_id)?;

    let snapshot = progress::aggregate(
        ProgressInput {
            event: &event,
            tasks: &tasks,
            milestones: &milestones,
            now,
        },
        config,
    );
    let score = health::health_score(&tasks, now);
    let insights = insights::insights(&InsightContext {
        tasks: &tasks,
        current_phase: snapshot.current_phase,
        event_date: event.scheduled_date,
        now,
    });
    let warnings = insights.iter().filter(|i| i.kind == InsightKind::Warning).count();

    Ok(WorkflowAnalysis {
        summary: health::summary(score, warnings),
        forecast: health::forecast(&tasks, event.scheduled_date, now),
        priority_recommendations: insights::recommend_priorities(&tasks, event.scheduled_date, now),
        insights,
        event_id: event.id,
        health_score: score,
    })
}

/// What workflow initialization created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowInit {
    pub event_id: String,
    pub milestones_created: usize,
    pub tasks_created: usize,
}

/// Seed an event with its type's milestone template and, optionally, the
/// starter task checklist. Runs once per event.
pub fn initialize_workflow(pool: &DbPool, event_id: &str, seed_tasks: bool) -> PlannerResult<WorkflowInit> {
    let event = event::get_event(pool, event_id)?;
    let Some(event_date) = event.scheduled_date else {
        return Err(PlannerError::validation(
            "event has no scheduled date; set one before initializing the workflow",
        ));
    };
    if milestone_queries::count_milestones(pool, event_id)? > 0 {
        return Err(PlannerError::WorkflowAlreadyInitialized(event_id.to_string()));
    }

    let new_milestones = templates::milestone_templates(event.event_type)
        .iter()
        .map(|t| t.to_new(event_date))
        .collect();
    let milestones = milestone::create_milestones(pool, event_id, new_milestones)?;

    let tasks_created = if seed_tasks {
        let new_tasks = templates::default_tasks().iter().map(|t| t.to_new()).collect();
        task::create_tasks(pool, event_id, new_tasks)?.len()
    } else {
        0
    };

    tracing::info!(
        event_id = %event_id,
        event_type = event.event_type.as_str(),
        milestones = milestones.len(),
        tasks = tasks_created,
        "Workflow initialized"
    );
    Ok(WorkflowInit {
        event_id: event_id.to_string(),
        milestones_created: milestones.len(),
        tasks_created,
    })
}
