//! Milestone management.

pub mod model;
pub mod tracker;

use meetup_db::queries::milestones as queries;
use meetup_db::DbPool;
use uuid::Uuid;

use crate::error::{not_found_as, PlannerError, PlannerResult};
use crate::{event, timestamp, validate};
use model::{Milestone, NewMilestone};

/// Add a milestone to an event. New milestones sort after existing ones on the same date.
pub fn create_milestone(pool: &DbPool, event_id: &str, input: NewMilestone) -> PlannerResult<Milestone> {
    event::get_event(pool, event_id)?;
    let sort_order = queries::count_milestones(pool, event_id)?;

    let milestone = Milestone {
        id: Uuid::new_v4().to_string(),
        event_id: event_id.to_string(),
        title: validate::title(&input.title)?,
        description: validate::optional_text(input.description),
        milestone_type: input.milestone_type,
        due_date: input.due_date,
        is_completed: false,
        completed_at: None,
        is_critical_path: input.is_critical_path,
        sort_order,
        created_at: timestamp::current(),
    };

    queries::create_milestone(pool, &milestone.to_row())?;
    tracing::debug!(milestone_id = %milestone.id, event_id = %event_id, "Milestone created");
    Ok(milestone)
}

/// Add several milestones in one transaction, in the given order.
pub fn create_milestones(pool: &DbPool, event_id: &str, inputs: Vec<NewMilestone>) -> PlannerResult<Vec<Milestone>> {
    event::get_event(pool, event_id)?;
    let first = queries::count_milestones(pool, event_id)?;
    let now = timestamp::current();

    let milestones = inputs
        .into_iter()
        .zip(first..)
        .map(|(input, sort_order)| -> PlannerResult<Milestone> {
            Ok(Milestone {
                id: Uuid::new_v4().to_string(),
                event_id: event_id.to_string(),
                title: validate::title(&input.title)?,
                description: validate::optional_text(input.description),
                milestone_type: input.milestone_type,
                due_date: input.due_date,
                is_completed: false,
                completed_at: None,
                is_critical_path: input.is_critical_path,
                sort_order,
                created_at: now,
            })
        })
        .collect::<PlannerResult<Vec<_>>>()?;

    let rows: Vec<_> = milestones.iter().map(Milestone::to_row).collect();
    queries::create_milestones(pool, &rows)?;
    Ok(milestones)
}

/// Get a milestone by ID.
pub fn get_milestone(pool: &DbPool, id: &str) -> PlannerResult<Milestone> {
    let row = queries::get_milestone(pool, id).map_err(not_found_as(PlannerError::MilestoneNotFound, id))?;
    Milestone::from_row(row)
}

/// List an event's milestones by due date.
pub fn list_milestones(pool: &DbPool, event_id: &str) -> PlannerResult<Vec<Milestone>> {
    event::get_event(pool, event_id)?;
    load_milestones(pool, event_id)
}

/// Milestones of an event without checking the event exists.
pub(crate) fn load_milestones(pool: &DbPool, event_id: &str) -> PlannerResult<Vec<Milestone>> {
    queries::list_milestones(pool, event_id)?
        .into_iter()
        .map(Milestone::from_row)
        .collect()
}

/// Mark a milestone completed. Completing twice keeps the first completion time.
pub fn complete_milestone(pool: &DbPool, id: &str) -> PlannerResult<Milestone> {
    let milestone = get_milestone(pool, id)?;
    if milestone.is_completed {
        return Ok(milestone);
    }
    queries::set_milestone_completed(pool, id, Some(&timestamp::now()))
        .map_err(not_found_as(PlannerError::MilestoneNotFound, id))?;
    tracing::info!(milestone_id = %id, title = %milestone.title, "Milestone completed");
    get_milestone(pool, id)
}

/// Reopen a completed milestone.
pub fn reopen_milestone(pool: &DbPool, id: &str) -> PlannerResult<Milestone> {
    queries::set_milestone_completed(pool, id, None)
        .map_err(not_found_as(PlannerError::MilestoneNotFound, id))?;
    get_milestone(pool, id)
}

pub fn delete_milestone(pool: &DbPool, id: &str) -> PlannerResult<()> {
    if !queries::delete_milestone(pool, id)? {
        return Err(PlannerError::MilestoneNotFound(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::model::NewEvent;
    use chrono::{Duration, Utc};
    use model::MilestoneType;

    fn setup() -> (DbPool, String) {
        let pool = meetup_db::init_memory_pool().unwrap();
        let event = event::create_event(
            &pool,
            NewEvent {
                title: "Rust Night".into(),
                ..NewEvent::default()
            },
        )
        .unwrap();
        (pool, event.id)
    }

    fn new_milestone(title: &str, days: i64) -> NewMilestone {
        NewMilestone {
            title: title.into(),
            description: None,
            milestone_type: MilestoneType::Deadline,
            due_date: timestamp::current() + Duration::days(days),
            is_critical_path: false,
        }
    }

    #[test]
    fn test_complete_and_reopen() {
        let (pool, event_id) = setup();
        let m = create_milestone(&pool, &event_id, new_milestone("Venue Booked", 10)).unwrap();
        assert!(!m.is_completed);

        let done = complete_milestone(&pool, &m.id).unwrap();
        assert!(done.is_completed);
        let first_completion = done.completed_at;
        assert!(first_completion.is_some());
        assert!(first_completion.unwrap() <= Utc::now());

        let again = complete_milestone(&pool, &m.id).unwrap();
        assert_eq!(again.completed_at, first_completion);

        let reopened = reopen_milestone(&pool, &m.id).unwrap();
        assert!(!reopened.is_completed);
        assert!(reopened.completed_at.is_none());
    }

    #[test]
    fn test_sort_order_follows_creation() {
        let (pool, event_id) = setup();
        let a = create_milestone(&pool, &event_id, new_milestone("A", 5)).unwrap();
        let b = create_milestone(&pool, &event_id, new_milestone("B", 2)).unwrap();
        assert_eq!(a.sort_order, 0);
        assert_eq!(b.sort_order, 1);

        let listed = list_milestones(&pool, &event_id).unwrap();
        assert_eq!(listed[0].id, b.id);
    }

    #[test]
    fn test_missing_milestone() {
        let (pool, event_id) = setup();
        assert!(matches!(complete_milestone(&pool, "nope"), Err(PlannerError::MilestoneNotFound(_))));
        assert!(matches!(delete_milestone(&pool, "nope"), Err(PlannerError::MilestoneNotFound(_))));
        assert!(matches!(
            create_milestone(&pool, "nope", new_milestone("A", 1)),
            Err(PlannerError::EventNotFound(_))
        ));
        assert!(list_milestones(&pool, &event_id).unwrap().is_empty());
    }
}
