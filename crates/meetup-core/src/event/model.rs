//! Event domain models.

use chrono::{DateTime, Utc};
use meetup_db::queries::events::EventRow;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::timestamp;

/// A meetup, workshop or conference being planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub status: EventStatus,
    pub event_type: EventType,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create from database row.
    pub fn from_row(row: EventRow) -> PlannerResult<Self> {
        let status = EventStatus::from_str(&row.status)
            .ok_or_else(|| PlannerError::validation(format!("unknown event status '{}'", row.status)))?;
        let event_type = EventType::from_str(&row.event_type)
            .ok_or_else(|| PlannerError::validation(format!("unknown event type '{}'", row.event_type)))?;
        Ok(Self {
            status,
            event_type,
            scheduled_date: timestamp::parse_optional("scheduled_date", row.scheduled_date.as_deref())?,
            created_at: timestamp::parse_required("created_at", &row.created_at)?,
            updated_at: timestamp::parse_required("updated_at", &row.updated_at)?,
            id: row.id,
            title: row.title,
            description: row.description,
            topic: row.topic,
        })
    }

    pub fn to_row(&self) -> EventRow {
        EventRow {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            topic: self.topic.clone(),
            status: self.status.as_str().to_string(),
            event_type: self.event_type.as_str().to_string(),
            scheduled_date: self.scheduled_date.as_ref().map(timestamp::format),
            created_at: timestamp::format(&self.created_at),
            updated_at: timestamp::format(&self.updated_at),
        }
    }

    /// Whole days from `now` until the event, negative once it has passed.
    pub fn days_until(&self, now: DateTime<Utc>) -> Option<i64> {
        self.scheduled_date.map(|date| (date - now).num_days())
    }
}

/// Event lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planning,
    Scheduled,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Some(Self::Planning),
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Kind of event. Selects the milestone template used by workflow init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Meetup,
    Workshop,
    Conference,
}

impl EventType {
    pub const ALL: [EventType; 3] = [Self::Meetup, Self::Workshop, Self::Conference];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "meetup" => Some(Self::Meetup),
            "workshop" => Some(Self::Workshop),
            "conference" => Some(Self::Conference),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meetup => "meetup",
            Self::Workshop => "workshop",
            Self::Conference => "conference",
        }
    }
}

/// Input for creating an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
}

/// Partial update. `None` leaves a field untouched; `scheduled_date:
/// Some(None)` (JSON `null`) unschedules the event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub status: Option<EventStatus>,
    pub event_type: Option<EventType>,
    #[serde(default, deserialize_with = "timestamp::deserialize_clearable")]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_round_trip_keeps_storage_format() {
        let row = EventRow {
            id: "e1".into(),
            title: "Rust Night".into(),
            description: None,
            topic: Some("async".into()),
            status: "scheduled".into(),
            event_type: "workshop".into(),
            scheduled_date: Some("2026-12-01T18:00:00Z".into()),
            created_at: "2026-10-01T00:00:00Z".into(),
            updated_at: "2026-10-02T09:30:00Z".into(),
        };
        let event = Event::from_row(row).unwrap();
        assert_eq!(event.status, EventStatus::Scheduled);
        assert_eq!(event.event_type, EventType::Workshop);

        let back = event.to_row();
        assert_eq!(back.scheduled_date.as_deref(), Some("2026-12-01T18:00:00Z"));
        assert_eq!(back.updated_at, "2026-10-02T09:30:00Z");
    }

    #[test]
    fn test_days_until() {
        let row = EventRow {
            id: "e1".into(),
            title: "Rust Night".into(),
            description: None,
            topic: None,
            status: "planning".into(),
            event_type: "meetup".into(),
            scheduled_date: Some("2026-12-01T18:00:00Z".into()),
            created_at: "2026-10-01T00:00:00Z".into(),
            updated_at: "2026-10-01T00:00:00Z".into(),
        };
        let event = Event::from_row(row).unwrap();
        let now = timestamp::parse("2026-11-21T18:00:00Z").unwrap();
        assert_eq!(event.days_until(now), Some(10));
    }
}
