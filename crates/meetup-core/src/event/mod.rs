//! Event management.

pub mod model;

use meetup_db::queries::events as queries;
use meetup_db::DbPool;
use uuid::Uuid;

use crate::error::{not_found_as, PlannerError, PlannerResult};
use crate::{timestamp, validate};
use model::{Event, EventStatus, EventUpdate, NewEvent};

/// Default page size for event listings.
pub const DEFAULT_LIMIT: i64 = 50;

/// Create a new event in `planning` status.
pub fn create_event(pool: &DbPool, input: NewEvent) -> PlannerResult<Event> {
    let now = timestamp::current();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: validate::title(&input.title)?,
        description: validate::optional_text(input.description),
        topic: validate::optional_text(input.topic),
        status: EventStatus::Planning,
        event_type: input.event_type,
        scheduled_date: input.scheduled_date,
        created_at: now,
        updated_at: now,
    };

    queries::create_event(pool, &event.to_row())?;
    tracing::info!(event_id = %event.id, title = %event.title, "Event created");
    Ok(event)
}

/// Get an event by ID.
pub fn get_event(pool: &DbPool, id: &str) -> PlannerResult<Event> {
    let row = queries::get_event(pool, id).map_err(not_found_as(PlannerError::EventNotFound, id))?;
    Event::from_row(row)
}

/// List events, newest first.
pub fn list_events(
    pool: &DbPool,
    status: Option<EventStatus>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> PlannerResult<Vec<Event>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 500);
    let offset = offset.unwrap_or(0).max(0);
    let rows = queries::list_events(pool, status.as_ref().map(EventStatus::as_str), limit, offset)?;
    rows.into_iter().map(Event::from_row).collect()
}

/// Apply a partial update.
pub fn update_event(pool: &DbPool, id: &str, update: EventUpdate) -> PlannerResult<Event> {
    let mut event = get_event(pool, id)?;

    if let Some(title) = update.title {
        event.title = validate::title(&title)?;
    }
    if let Some(description) = update.description {
        event.description = validate::optional_text(Some(description));
    }
    if let Some(topic) = update.topic {
        event.topic = validate::optional_text(Some(topic));
    }
    if let Some(status) = update.status {
        event.status = status;
    }
    if let Some(event_type) = update.event_type {
        event.event_type = event_type;
    }
    if let Some(date) = update.scheduled_date {
        event.scheduled_date = date;
    }
    event.updated_at = timestamp::current();

    queries::update_event(pool, &event.to_row()).map_err(not_found_as(PlannerError::EventNotFound, id))?;
    tracing::debug!(event_id = %id, "Event updated");
    Ok(event)
}

/// Delete an event together with its tasks and milestones.
pub fn delete_event(pool: &DbPool, id: &str) -> PlannerResult<()> {
    if !queries::delete_event(pool, id)? {
        return Err(PlannerError::EventNotFound(id.to_string()));
    }
    tracing::info!(event_id = %id, "Event deleted");
    Ok(())
}
