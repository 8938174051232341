//! Milestone domain models.

use chrono::{DateTime, Utc};
use meetup_db::queries::milestones::MilestoneRow;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::timestamp;

/// A dated checkpoint in an event's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub milestone_type: MilestoneType,
    pub due_date: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_critical_path: bool,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

impl Milestone {
    /// Create from database row.
    pub fn from_row(row: MilestoneRow) -> PlannerResult<Self> {
        let milestone_type = MilestoneType::from_str(&row.milestone_type).ok_or_else(|| {
            PlannerError::validation(format!("unknown milestone type '{}'", row.milestone_type))
        })?;
        Ok(Self {
            milestone_type,
            due_date: timestamp::parse_required("due_date", &row.due_date)?,
            completed_at: timestamp::parse_optional("completed_at", row.completed_at.as_deref())?,
            created_at: timestamp::parse_required("created_at", &row.created_at)?,
            id: row.id,
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            is_completed: row.is_completed,
            is_critical_path: row.is_critical_path,
            sort_order: row.sort_order,
        })
    }

    pub fn to_row(&self) -> MilestoneRow {
        MilestoneRow {
            id: self.id.clone(),
            event_id: self.event_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            milestone_type: self.milestone_type.as_str().to_string(),
            due_date: timestamp::format(&self.due_date),
            is_completed: self.is_completed,
            completed_at: self.completed_at.as_ref().map(timestamp::format),
            is_critical_path: self.is_critical_path,
            sort_order: self.sort_order,
            created_at: timestamp::format(&self.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    #[default]
    Deliverable,
    Deadline,
    Event,
}

impl MilestoneType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "deliverable" => Some(Self::Deliverable),
            "deadline" => Some(Self::Deadline),
            "event" => Some(Self::Event),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deliverable => "deliverable",
            Self::Deadline => "deadline",
            Self::Event => "event",
        }
    }
}

/// Input for creating a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub milestone_type: MilestoneType,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub is_critical_path: bool,
}
