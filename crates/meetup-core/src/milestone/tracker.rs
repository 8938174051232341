//! Milestone timeline.
//!
//! Orders an event's milestones, classifies each against the current time
//! and places it on a 0..=100 axis running from the earlier of the first
//! due date and now, to the event date. Pure: the caller supplies `now`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::Milestone;

/// Where a milestone stands relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneState {
    Completed,
    Overdue,
    Upcoming,
}

/// One milestone placed on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub milestone: Milestone,
    pub state: MilestoneState,
    /// Percent along the timeline axis, 0.0..=100.0.
    pub position: f64,
    /// Whole days until due, negative when past.
    pub days_until_due: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneTimeline {
    pub entries: Vec<TimelineEntry>,
    /// Ids of critical-path milestones in timeline order.
    pub critical_path: Vec<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl MilestoneTimeline {
    /// The earliest milestone still ahead and not completed.
    pub fn next_upcoming(&self) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.state == MilestoneState::Upcoming)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the timeline for one event.
pub fn track(
    mut milestones: Vec<Milestone>,
    event_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> MilestoneTimeline {
    if milestones.is_empty() {
        return MilestoneTimeline::default();
    }

    milestones.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.sort_order.cmp(&b.sort_order))
            .then_with(|| a.title.cmp(&b.title))
    });

    let earliest = milestones[0].due_date;
    let latest = milestones[milestones.len() - 1].due_date;
    let start = earliest.min(now);
    let end = event_date.unwrap_or(latest);
    let span = (end - start).num_seconds();

    let entries: Vec<TimelineEntry> = milestones
        .into_iter()
        .map(|m| {
            let state = classify(&m, now);
            let position = if span <= 0 {
                if m.due_date < now { 0.0 } else { 100.0 }
            } else {
                let offset = (m.due_date - start).num_seconds() as f64;
                (offset / span as f64 * 100.0).clamp(0.0, 100.0)
            };
            TimelineEntry {
                days_until_due: (m.due_date - now).num_days(),
                milestone: m,
                state,
                position,
            }
        })
        .collect();

    let critical_path = entries
        .iter()
        .filter(|e| e.milestone.is_critical_path)
        .map(|e| e.milestone.id.clone())
        .collect();
    let completed = entries.iter().filter(|e| e.state == MilestoneState::Completed).count();
    let overdue = entries.iter().filter(|e| e.state == MilestoneState::Overdue).count();

    MilestoneTimeline {
        total: entries.len(),
        entries,
        critical_path,
        start: Some(start),
        end: Some(end),
        completed,
        overdue,
    }
}

fn classify(milestone: &Milestone, now: DateTime<Utc>) -> MilestoneState {
    if milestone.is_completed {
        MilestoneState::Completed
    } else if milestone.due_date < now {
        MilestoneState::Overdue
    } else {
        MilestoneState::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestone::model::MilestoneType;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap()
    }

    fn milestone(id: &str, due: DateTime<Utc>, completed: bool, critical: bool) -> Milestone {
        Milestone {
            id: id.to_string(),
            event_id: "e1".to_string(),
            title: id.to_string(),
            description: None,
            milestone_type: MilestoneType::Deadline,
            due_date: due,
            is_completed: completed,
            completed_at: completed.then_some(due),
            is_critical_path: critical,
            sort_order: 0,
            created_at: now(),
        }
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = track(Vec::new(), Some(now()), now());
        assert!(timeline.is_empty());
        assert!(timeline.critical_path.is_empty());
        assert_eq!(timeline.total, 0);
    }

    #[test]
    fn test_overdue_versus_completed() {
        let yesterday = now() - Duration::days(1);
        let timeline = track(
            vec![
                milestone("late", yesterday, false, false),
                milestone("done", yesterday, true, false),
            ],
            Some(now() + Duration::days(30)),
            now(),
        );
        let state_of = |id: &str| {
            timeline
                .entries
                .iter()
                .find(|e| e.milestone.id == id)
                .map(|e| e.state)
        };
        assert_eq!(state_of("late"), Some(MilestoneState::Overdue));
        assert_eq!(state_of("done"), Some(MilestoneState::Completed));
        assert_eq!(timeline.overdue, 1);
        assert_eq!(timeline.completed, 1);
    }

    #[test]
    fn test_positions_monotonic_and_bounded() {
        let event = now() + Duration::days(40);
        let timeline = track(
            vec![
                milestone("d", now() + Duration::days(50), false, false),
                milestone("b", now() + Duration::days(10), false, true),
                milestone("a", now() - Duration::days(20), true, true),
                milestone("c", now() + Duration::days(20), false, false),
            ],
            Some(event),
            now(),
        );

        let ids: Vec<&str> = timeline.entries.iter().map(|e| e.milestone.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        let positions: Vec<f64> = timeline.entries.iter().map(|e| e.position).collect();
        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        assert!(positions.iter().all(|p| (0.0..=100.0).contains(p)));
        assert_eq!(positions[0], 0.0);
        // Past the event date clamps to the end.
        assert_eq!(positions[3], 100.0);
        assert!((positions[1] - 50.0).abs() < 1e-9);

        assert_eq!(timeline.critical_path, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(timeline.next_upcoming().map(|e| e.milestone.id.as_str()), Some("b"));
    }

    #[test]
    fn test_ties_break_on_sort_order_then_title() {
        let due = now() + Duration::days(5);
        let mut second = milestone("z-first", due, false, false);
        second.sort_order = 0;
        let mut third = milestone("a-late", due, false, false);
        third.sort_order = 1;
        let mut first = milestone("b", due, false, false);
        first.sort_order = 0;
        first.title = "a".to_string();

        let timeline = track(vec![third, second, first], None, now());
        let ids: Vec<&str> = timeline.entries.iter().map(|e| e.milestone.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "z-first", "a-late"]);
    }

    #[test]
    fn test_degenerate_span() {
        // Due exactly now with no event date: zero-length axis.
        let timeline = track(vec![milestone("only", now(), false, false)], None, now());
        assert_eq!(timeline.entries[0].position, 100.0);
        assert_eq!(timeline.entries[0].state, MilestoneState::Upcoming);

        // Event date before the start collapses the axis.
        let past = now() - Duration::days(3);
        let timeline = track(
            vec![milestone("late", past, false, false)],
            Some(now() - Duration::days(10)),
            now(),
        );
        assert_eq!(timeline.entries[0].position, 0.0);
    }
}
