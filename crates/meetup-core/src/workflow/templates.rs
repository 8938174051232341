//! Built-in planning templates.
//!
//! Milestones are dated relative to the event (`days_before`, negative
//! for follow-ups after the event). The task checklist seeds a few
//! starter tasks in every phase.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::Phase;
use crate::event::model::EventType;
use crate::milestone::model::{MilestoneType, NewMilestone};
use crate::task::model::{Category, NewTask, Priority};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MilestoneTemplate {
    pub title: &'static str,
    pub milestone_type: MilestoneType,
    pub days_before: i64,
    pub critical: bool,
}

impl MilestoneTemplate {
    pub fn due_date(&self, event_date: DateTime<Utc>) -> DateTime<Utc> {
        event_date - Duration::days(self.days_before)
    }

    pub fn to_new(&self, event_date: DateTime<Utc>) -> NewMilestone {
        NewMilestone {
            title: self.title.to_string(),
            description: None,
            milestone_type: self.milestone_type,
            due_date: self.due_date(event_date),
            is_critical_path: self.critical,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskTemplate {
    pub phase: Phase,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub priority: Priority,
}

impl TaskTemplate {
    pub fn to_new(&self) -> NewTask {
        NewTask {
            description: Some(self.description.to_string()),
            priority: self.priority,
            ..NewTask::new(self.title, self.phase, self.category)
        }
    }
}

const fn milestone(title: &'static str, milestone_type: MilestoneType, days_before: i64, critical: bool) -> MilestoneTemplate {
    MilestoneTemplate {
        title,
        milestone_type,
        days_before,
        critical,
    }
}

const fn task(
    phase: Phase,
    title: &'static str,
    description: &'static str,
    category: Category,
    priority: Priority,
) -> TaskTemplate {
    TaskTemplate {
        phase,
        title,
        description,
        category,
        priority,
    }
}

use MilestoneType::{Deadline, Deliverable, Event as Day};

const MEETUP_MILESTONES: &[MilestoneTemplate] = &[
    milestone("Event Concept Finalized", Deliverable, 60, true),
    milestone("Venue Booked", Deadline, 45, true),
    milestone("First Speaker Confirmed", Deliverable, 35, false),
    milestone("Registration Opens", Deadline, 30, true),
    milestone("Website Live", Deliverable, 28, true),
    milestone("Marketing Campaign Launch", Deliverable, 21, false),
    milestone("Speaker Deck Due", Deadline, 14, false),
    milestone("Registration Deadline", Deadline, 7, true),
    milestone("Final Run-through", Deliverable, 3, false),
    milestone("Event Day", Day, 0, true),
    milestone("Feedback Survey Sent", Deadline, -1, false),
    milestone("Event Report Complete", Deliverable, -7, false),
];

const WORKSHOP_MILESTONES: &[MilestoneTemplate] = &[
    milestone("Curriculum Finalized", Deliverable, 45, true),
    milestone("Venue & Date Confirmed", Deadline, 40, true),
    milestone("Instructor Contracts Signed", Deliverable, 35, true),
    milestone("Registration Opens", Deadline, 30, true),
    milestone("Course Materials Draft", Deliverable, 21, false),
    milestone("Registration Deadline", Deadline, 7, true),
    milestone("Final Materials Ready", Deliverable, 5, true),
    milestone("Event Day", Day, 0, true),
    milestone("Certificates Issued", Deliverable, -3, false),
];

const CONFERENCE_MILESTONES: &[MilestoneTemplate] = &[
    milestone("Conference Theme & Scope Defined", Deliverable, 120, true),
    milestone("Keynote Speakers Secured", Deliverable, 90, true),
    milestone("Venue Contract Signed", Deadline, 90, true),
    milestone("Call for Proposals Open", Deadline, 75, false),
    milestone("Early Bird Registration", Deadline, 60, true),
    milestone("CFP Deadline", Deadline, 45, true),
    milestone("Speaker Schedule Published", Deliverable, 30, true),
    milestone("Regular Registration Closes", Deadline, 14, true),
    milestone("Final AV Checklist", Deliverable, 7, false),
    milestone("Conference Day 1", Day, 0, true),
    milestone("Post-Conference Report", Deliverable, -14, false),
];

use Category::{Catering, Content, Logistics as Ops, Marketing as Promo, Registration, Speakers, Sponsors, Venue};
use Priority::{Critical, High, Low, Medium};

const DEFAULT_TASKS: &[TaskTemplate] = &[
    task(Phase::Ideation, "Define Event Concept & Vision", "Write a clear vision statement and key objectives", Content, Critical),
    task(Phase::Ideation, "Identify Target Audience", "Define attendee personas, experience level and interests", Content, High),
    task(Phase::Ideation, "Set Budget Framework", "Estimate costs for venue, food, speakers and marketing", Sponsors, High),
    task(Phase::Ideation, "Select Potential Dates", "Shortlist dates that avoid holidays and clashing events", Ops, Medium),
    task(Phase::Logistics, "Negotiate & Book Venue", "Compare shortlisted venues and sign the booking", Venue, Critical),
    task(Phase::Logistics, "Research & Identify Speakers", "Build a list of candidate speakers for the topic", Speakers, High),
    task(Phase::Logistics, "Finalize Speaker Lineup", "Confirm every speaker and their talk title", Speakers, Critical),
    task(Phase::Logistics, "Arrange Catering", "Order food and drinks for the expected headcount", Catering, Medium),
    task(Phase::Logistics, "Plan Registration Process", "Choose ticketing, capacity and waitlist rules", Registration, High),
    task(Phase::Marketing, "Write Event Copy", "Draft the event description and speaker bios", Content, High),
    task(Phase::Marketing, "Create Landing Page", "Publish the event page with agenda and signup link", Promo, High),
    task(Phase::Marketing, "Set Up Registration System", "Open registrations and test the confirmation email", Registration, Critical),
    task(Phase::Marketing, "Create Social Media Strategy", "Plan announcement, speaker spotlight and reminder posts", Promo, Medium),
    task(Phase::Marketing, "Reach Out to Partners", "Ask community partners and sponsors to share the event", Sponsors, Medium),
    task(Phase::Preparation, "Final Speaker Communications", "Send speakers the schedule, venue details and AV notes", Speakers, High),
    task(Phase::Preparation, "Review & Test AV Equipment", "Check projector, microphones and streaming setup", Ops, Critical),
    task(Phase::Preparation, "Confirm Catering Order", "Confirm final headcount and dietary needs", Catering, High),
    task(Phase::Preparation, "Set Up Event Check-in System", "Prepare the attendee list and check-in flow", Registration, High),
    task(Phase::Execution, "Arrive Early & Set Up", "Arrange seating, signage and the registration desk", Venue, Critical),
    task(Phase::Execution, "Manage Check-in Process", "Greet attendees and track turnout", Registration, High),
    task(Phase::Execution, "Facilitate Opening", "Welcome attendees and introduce the speakers", Content, High),
    task(Phase::Execution, "Collect Feedback Cards", "Gather quick feedback before people leave", Content, Medium),
    task(Phase::Review, "Send Thank You Emails", "Thank attendees, speakers and sponsors", Promo, High),
    task(Phase::Review, "Upload Session Recordings", "Publish recordings and slides", Content, Medium),
    task(Phase::Review, "Document Lessons Learned", "Write up what worked and what to change next time", Content, Medium),
    task(Phase::Review, "Update Speaker Database", "Record speaker contacts and talk feedback", Speakers, Low),
];

/// Milestone template for an event type.
pub fn milestone_templates(event_type: EventType) -> &'static [MilestoneTemplate] {
    match event_type {
        EventType::Meetup => MEETUP_MILESTONES,
        EventType::Workshop => WORKSHOP_MILESTONES,
        EventType::Conference => CONFERENCE_MILESTONES,
    }
}

/// Starter checklist seeded into every new workflow.
pub fn default_tasks() -> &'static [TaskTemplate] {
    DEFAULT_TASKS
}

/// Listing of every built-in template, for the templates endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCatalog {
    pub milestones: Vec<EventTypeTemplates>,
    pub tasks: &'static [TaskTemplate],
}

#[derive(Debug, Clone, Serialize)]
pub struct EventTypeTemplates {
    pub event_type: EventType,
    pub milestones: &'static [MilestoneTemplate],
}

pub fn catalog() -> TemplateCatalog {
    TemplateCatalog {
        milestones: EventType::ALL
            .iter()
            .map(|t| EventTypeTemplates {
                event_type: *t,
                milestones: milestone_templates(*t),
            })
            .collect(),
        tasks: DEFAULT_TASKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_every_type_ends_on_event_day() {
        for event_type in EventType::ALL {
            let templates = milestone_templates(event_type);
            assert!(templates
                .iter()
                .any(|m| m.days_before == 0 && m.milestone_type == MilestoneType::Event && m.critical));
        }
        assert_eq!(milestone_templates(EventType::Meetup).len(), 12);
        assert_eq!(milestone_templates(EventType::Workshop).len(), 9);
        assert_eq!(milestone_templates(EventType::Conference).len(), 11);
    }

    #[test]
    fn test_due_date_offsets() {
        let event = Utc.with_ymd_and_hms(2026, 12, 1, 18, 0, 0).unwrap();
        let venue = milestone_templates(EventType::Meetup)
            .iter()
            .find(|m| m.title == "Venue Booked")
            .unwrap();
        assert_eq!(venue.due_date(event), Utc.with_ymd_and_hms(2026, 10, 17, 18, 0, 0).unwrap());

        let report = milestone_templates(EventType::Meetup).last().unwrap();
        assert!(report.due_date(event) > event);
    }

    #[test]
    fn test_checklist_covers_every_phase() {
        for phase in Phase::ALL {
            let n = default_tasks().iter().filter(|t| t.phase == phase).count();
            assert!(n >= 3, "{phase} has only {n} starter tasks");
        }
        assert!(default_tasks()
            .iter()
            .any(|t| t.phase == Phase::Logistics && t.category == Category::Speakers));
    }
}
