//! Rule table for workflow suggestions.
//!
//! Each rule is a condition over the snapshot plus a message template.
//! Rules run in table order (warnings first) and the output is capped at
//! `max_suggestions`.

use super::model::{PhaseProgress, Severity, Suggestion, TaskCounts};
use super::Phase;
use crate::config::WorkflowConfig;
use crate::milestone::tracker::TimelineEntry;
use crate::task::model::{Category, Task};

/// What rules may look at.
pub struct RuleContext<'a> {
    pub phases: &'a [PhaseProgress],
    pub tasks: &'a [Task],
    pub counts: &'a TaskCounts,
    pub days_until_event: Option<i64>,
    pub next_milestone: Option<&'a TimelineEntry>,
}

impl RuleContext<'_> {
    fn progress(&self, phase: Phase) -> f64 {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map_or(0.0, |p| p.progress_percent)
    }

    fn open_tasks<'s>(&'s self, category: Category) -> impl Iterator<Item = &'s Task> + 's {
        self.tasks
            .iter()
            .filter(move |t| t.category == Some(category) && !t.is_done())
    }
}

struct Rule {
    id: &'static str,
    severity: Severity,
    check: fn(&RuleContext<'_>, &WorkflowConfig) -> Option<String>,
}

const RULES: &[Rule] = &[
    Rule {
        id: "blocked_tasks",
        severity: Severity::Warning,
        check: blocked_tasks,
    },
    Rule {
        id: "overdue_tasks",
        severity: Severity::Warning,
        check: overdue_tasks,
    },
    Rule {
        id: "unconfirmed_speakers",
        severity: Severity::Warning,
        check: unconfirmed_speakers,
    },
    Rule {
        id: "marketing_behind",
        severity: Severity::Warning,
        check: marketing_behind,
    },
    Rule {
        id: "venue_unbooked",
        severity: Severity::Warning,
        check: venue_unbooked,
    },
    Rule {
        id: "milestone_soon",
        severity: Severity::Warning,
        check: milestone_soon,
    },
    Rule {
        id: "unclassified_tasks",
        severity: Severity::Warning,
        check: unclassified_tasks,
    },
    Rule {
        id: "ready_for_event",
        severity: Severity::Tip,
        check: ready_for_event,
    },
    Rule {
        id: "planning_momentum",
        severity: Severity::Tip,
        check: planning_momentum,
    },
];

/// Run every rule in order and keep the first `max_suggestions` that fire.
pub fn evaluate(ctx: &RuleContext<'_>, config: &WorkflowConfig) -> Vec<Suggestion> {
    RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(ctx, config).map(|message| Suggestion {
                rule: rule.id.to_string(),
                severity: rule.severity,
                message,
            })
        })
        .take(config.max_suggestions())
        .collect()
}

fn blocked_tasks(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let n = ctx.counts.blocked;
    (n > 0).then(|| format!("{n} task(s) are blocked. Resolve the blockers or reassign the work."))
}

fn overdue_tasks(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let n = ctx.counts.overdue;
    (n > 0).then(|| format!("{n} task(s) are overdue. Prioritize them to stay on schedule."))
}

fn unconfirmed_speakers(ctx: &RuleContext<'_>, config: &WorkflowConfig) -> Option<String> {
    let n = ctx
        .open_tasks(Category::Speakers)
        .filter(|t| t.phase == Some(Phase::Logistics))
        .count();
    (n > 0 && n >= config.speaker_threshold())
        .then(|| format!("{n} speaker(s) unconfirmed. Follow up with them this week."))
}

fn marketing_behind(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let days = ctx.days_until_event?;
    let progress = ctx.progress(Phase::Marketing);
    ((0..30).contains(&days) && progress < 50.0).then(|| {
        format!("Marketing is at {progress:.0}% with {days} day(s) to go. Launch campaigns now.")
    })
}

fn venue_unbooked(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let days = ctx.days_until_event?;
    let open = ctx.open_tasks(Category::Venue).count();
    ((0..45).contains(&days) && open > 0)
        .then(|| format!("Venue is not booked with {days} day(s) remaining. Secure it to hold your date."))
}

fn milestone_soon(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let next = ctx.next_milestone?;
    (next.days_until_due < 7).then(|| {
        format!(
            "Next milestone '{}' is due in {} day(s). Focus on the tasks that feed it.",
            next.milestone.title, next.days_until_due
        )
    })
}

fn unclassified_tasks(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    let n = ctx.counts.unclassified;
    (n > 0).then(|| format!("{n} task(s) have no recognized phase and are left out of progress."))
}

fn ready_for_event(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    (ctx.progress(Phase::Execution) >= 100.0)
        .then(|| "All preparation complete. You're ready for event day!".to_string())
}

fn planning_momentum(ctx: &RuleContext<'_>, _: &WorkflowConfig) -> Option<String> {
    (ctx.progress(Phase::Ideation) > 50.0 && ctx.progress(Phase::Logistics) > 50.0)
        .then(|| "Great progress on planning and logistics. Keep the momentum going.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkflowSettings;
    use crate::task::model::{Priority, TaskStatus};
    use chrono::{TimeZone, Utc};

    fn phases(progress: &[(Phase, f64)]) -> Vec<PhaseProgress> {
        Phase::ALL
            .iter()
            .map(|phase| {
                let pct = progress
                    .iter()
                    .find(|(p, _)| p == phase)
                    .map_or(0.0, |(_, v)| *v);
                PhaseProgress {
                    phase: *phase,
                    name: phase.display_name().to_string(),
                    weight: 0,
                    completed_task_count: 0,
                    total_task_count: 1,
                    progress_percent: pct,
                    is_active: false,
                    is_completed: pct >= 100.0,
                    has_blocked_tasks: false,
                }
            })
            .collect()
    }

    fn speaker_task(id: &str, status: TaskStatus) -> Task {
        let ts = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        Task {
            id: id.into(),
            event_id: "e1".into(),
            title: "Confirm speaker".into(),
            description: None,
            phase: Some(Phase::Logistics),
            category: Some(Category::Speakers),
            status,
            priority: Priority::High,
            assignee: None,
            due_date: None,
            is_blocked: false,
            blocking_reason: None,
            created_at: ts,
            updated_at: ts,
            completed_at: None,
        }
    }

    fn ids(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.rule.as_str()).collect()
    }

    #[test]
    fn test_nothing_fires_on_quiet_snapshot() {
        let phases = phases(&[]);
        let counts = TaskCounts::default();
        let ctx = RuleContext {
            phases: &phases,
            tasks: &[],
            counts: &counts,
            days_until_event: Some(90),
            next_milestone: None,
        };
        assert!(evaluate(&ctx, &WorkflowConfig::default()).is_empty());
    }

    #[test]
    fn test_speaker_rule_counts_open_logistics_speakers() {
        let phases = phases(&[]);
        let counts = TaskCounts::default();
        let tasks = vec![
            speaker_task("a", TaskStatus::Todo),
            speaker_task("b", TaskStatus::Review),
            speaker_task("c", TaskStatus::Done),
        ];
        let ctx = RuleContext {
            phases: &phases,
            tasks: &tasks,
            counts: &counts,
            days_until_event: Some(90),
            next_milestone: None,
        };
        let out = evaluate(&ctx, &WorkflowConfig::default());
        assert_eq!(ids(&out), vec!["unconfirmed_speakers"]);
        assert!(out[0].message.starts_with("2 speaker(s)"));

        let strict = WorkflowConfig::new(WorkflowSettings {
            speaker_threshold: 3,
            ..WorkflowSettings::default()
        })
        .unwrap();
        assert!(evaluate(&ctx, &strict).is_empty());
    }

    #[test]
    fn test_schedule_rules_need_a_date() {
        let phases = phases(&[(Phase::Ideation, 60.0), (Phase::Logistics, 75.0)]);
        let counts = TaskCounts::default();
        let mut ctx = RuleContext {
            phases: &phases,
            tasks: &[],
            counts: &counts,
            days_until_event: None,
            next_milestone: None,
        };
        assert_eq!(ids(&evaluate(&ctx, &WorkflowConfig::default())), vec!["planning_momentum"]);

        ctx.days_until_event = Some(20);
        let out = evaluate(&ctx, &WorkflowConfig::default());
        assert_eq!(ids(&out), vec!["marketing_behind", "planning_momentum"]);
        assert_eq!(out[0].severity, Severity::Warning);
        assert_eq!(out[1].severity, Severity::Tip);
    }

    #[test]
    fn test_schedule_rules_stop_after_event_day() {
        let phases = phases(&[]);
        let counts = TaskCounts::default();
        let venue = Task {
            category: Some(Category::Venue),
            title: "Book venue".into(),
            ..speaker_task("v", TaskStatus::Todo)
        };
        let tasks = vec![venue];
        let mut ctx = RuleContext {
            phases: &phases,
            tasks: &tasks,
            counts: &counts,
            days_until_event: Some(0),
            next_milestone: None,
        };
        assert_eq!(ids(&evaluate(&ctx, &WorkflowConfig::default())), vec!["marketing_behind", "venue_unbooked"]);

        ctx.days_until_event = Some(-3);
        assert!(evaluate(&ctx, &WorkflowConfig::default()).is_empty());
    }

    #[test]
    fn test_output_is_capped() {
        let phases = phases(&[(Phase::Ideation, 60.0), (Phase::Logistics, 60.0), (Phase::Execution, 100.0)]);
        let counts = TaskCounts {
            blocked: 1,
            overdue: 2,
            unclassified: 1,
            ..TaskCounts::default()
        };
        let tasks = vec![speaker_task("a", TaskStatus::Todo)];
        let ctx = RuleContext {
            phases: &phases,
            tasks: &tasks,
            counts: &counts,
            days_until_event: Some(10),
            next_milestone: None,
        };
        let out = evaluate(&ctx, &WorkflowConfig::default());
        assert_eq!(out.len(), 5);
        assert_eq!(
            ids(&out),
            vec!["blocked_tasks", "overdue_tasks", "unconfirmed_speakers", "marketing_behind", "unclassified_tasks"]
        );
    }
}
