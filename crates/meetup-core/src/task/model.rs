//! Task domain models.

use chrono::{DateTime, Utc};
use meetup_db::queries::tasks::TaskRow;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::timestamp;
use crate::workflow::Phase;

/// A task on an event's kanban board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    /// `None` when the stored phase is not one of the six known phases.
    pub phase: Option<Phase>,
    pub category: Option<Category>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub blocking_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a Task from a database row.
    ///
    /// Unknown phases and categories are kept as `None` so the row still
    /// counts; malformed timestamps are an error.
    pub fn from_row(row: TaskRow) -> PlannerResult<Self> {
        let phase = Phase::from_str(&row.phase);
        if phase.is_none() {
            tracing::warn!(task_id = %row.id, phase = %row.phase, "Task has unknown phase");
        }
        let category = Category::from_str(&row.category);
        if category.is_none() {
            tracing::warn!(task_id = %row.id, category = %row.category, "Task has unknown category");
        }
        let status = TaskStatus::from_str(&row.status)
            .ok_or_else(|| PlannerError::validation(format!("unknown task status '{}'", row.status)))?;
        let priority = Priority::from_str(&row.priority)
            .ok_or_else(|| PlannerError::validation(format!("unknown task priority '{}'", row.priority)))?;

        Ok(Self {
            phase,
            category,
            status,
            priority,
            due_date: timestamp::parse_optional("due_date", row.due_date.as_deref())?,
            created_at: timestamp::parse_required("created_at", &row.created_at)?,
            updated_at: timestamp::parse_required("updated_at", &row.updated_at)?,
            completed_at: timestamp::parse_optional("completed_at", row.completed_at.as_deref())?,
            id: row.id,
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            assignee: row.assignee,
            is_blocked: row.is_blocked,
            blocking_reason: row.blocking_reason,
        })
    }

    /// Convert back into a storage row.
    pub fn to_row(&self) -> TaskRow {
        TaskRow {
            id: self.id.clone(),
            event_id: self.event_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            phase: self.phase.map_or_else(String::new, |p| p.as_str().to_string()),
            category: self.category.map_or_else(String::new, |c| c.as_str().to_string()),
            status: self.status.as_str().to_string(),
            priority: self.priority.as_str().to_string(),
            assignee: self.assignee.clone(),
            due_date: self.due_date.as_ref().map(timestamp::format),
            is_blocked: self.is_blocked,
            blocking_reason: self.blocking_reason.clone(),
            created_at: timestamp::format(&self.created_at),
            updated_at: timestamp::format(&self.updated_at),
            completed_at: self.completed_at.as_ref().map(timestamp::format),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Past its due date and not done.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_done() && self.due_date.is_some_and(|due| due < now)
    }
}

/// Task status (kanban column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Board column order.
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Area of work a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Speakers,
    Venue,
    Marketing,
    Sponsors,
    Catering,
    Logistics,
    Registration,
    Content,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Speakers,
        Self::Venue,
        Self::Marketing,
        Self::Sponsors,
        Self::Catering,
        Self::Logistics,
        Self::Registration,
        Self::Content,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speakers => "speakers",
            Self::Venue => "venue",
            Self::Marketing => "marketing",
            Self::Sponsors => "sponsors",
            Self::Catering => "catering",
            Self::Logistics => "logistics",
            Self::Registration => "registration",
            Self::Content => "content",
        }
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub phase: Phase,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, phase: Phase, category: Category) -> Self {
        Self {
            title: title.into(),
            description: None,
            phase,
            category,
            priority: Priority::default(),
            assignee: None,
            due_date: None,
        }
    }
}

/// Partial update. `None` leaves a field untouched; `due_date: Some(None)`
/// (JSON `null`) clears the due date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub phase: Option<Phase>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_clearable")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// A kanban board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub event_id: String,
    pub columns: Vec<BoardColumn>,
}

/// A column on the kanban board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub name: String,
    pub tasks: Vec<Task>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(phase: &str, category: &str) -> TaskRow {
        TaskRow {
            id: "t1".into(),
            event_id: "e1".into(),
            title: "Book venue".into(),
            description: None,
            phase: phase.into(),
            category: category.into(),
            status: "in_progress".into(),
            priority: "high".into(),
            assignee: None,
            due_date: Some("2026-11-01T00:00:00Z".into()),
            is_blocked: false,
            blocking_reason: None,
            created_at: "2026-10-01T00:00:00Z".into(),
            updated_at: "2026-10-01T00:00:00Z".into(),
            completed_at: None,
        }
    }

    #[test]
    fn test_from_row() {
        let task = Task::from_row(row("logistics", "venue")).unwrap();
        assert_eq!(task.phase, Some(Phase::Logistics));
        assert_eq!(task.category, Some(Category::Venue));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.to_row().due_date.as_deref(), Some("2026-11-01T00:00:00Z"));
    }

    #[test]
    fn test_unknown_phase_loads_unclassified() {
        let task = Task::from_row(row("launch", "swag")).unwrap();
        assert_eq!(task.phase, None);
        assert_eq!(task.category, None);
    }

    #[test]
    fn test_bad_timestamp_is_error() {
        let mut bad = row("logistics", "venue");
        bad.created_at = "yesterday".into();
        assert!(Task::from_row(bad).is_err());
    }

    #[test]
    fn test_overdue() {
        let task = Task::from_row(row("logistics", "venue")).unwrap();
        let before = timestamp::parse("2026-10-15T00:00:00Z").unwrap();
        let after = timestamp::parse("2026-11-02T00:00:00Z").unwrap();
        assert!(!task.is_overdue(before));
        assert!(task.is_overdue(after));

        let done = Task { status: TaskStatus::Done, ..task };
        assert!(!done.is_overdue(after));
    }

    #[test]
    fn test_update_due_date_null_clears() {
        let keep: TaskUpdate = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(keep.due_date, None);

        let clear: TaskUpdate = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(clear.due_date, Some(None));

        let set: TaskUpdate = serde_json::from_str(r#"{"due_date": "2026-11-01T00:00:00Z"}"#).unwrap();
        assert_eq!(set.due_date, Some(timestamp::parse("2026-11-01T00:00:00Z")));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::from_str("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_str("blocked"), None);
        assert_eq!(Category::from_str("Speakers"), Some(Category::Speakers));
    }
}
