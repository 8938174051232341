//! Deterministic workflow insights and priority recommendations.
//!
//! Checks run in table order over the event's tasks. Each check may emit
//! several insights; nothing here touches the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::health::estimate_effort;
use super::Phase;
use crate::task::model::{Category, Priority, Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Suggestion,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightArea {
    Priority,
    Timeline,
    Resources,
    Dependencies,
    Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Critical,
    High,
    Medium,
    Low,
}

/// One finding about the event's task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable identifier of the check that produced it.
    pub check: String,
    pub kind: InsightKind,
    pub area: InsightArea,
    pub impact: Impact,
    pub title: String,
    pub message: String,
    pub recommendation: Option<String>,
    pub task_ids: Vec<String>,
}

/// A task whose priority looks wrong for its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRecommendation {
    pub task_id: String,
    pub title: String,
    pub current: Priority,
    pub suggested: Priority,
    pub score: f64,
    pub factors: Vec<String>,
}

/// What checks may look at.
pub struct InsightContext<'a> {
    pub tasks: &'a [Task],
    pub current_phase: Phase,
    pub event_date: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

impl InsightContext<'_> {
    fn days_until_event(&self) -> Option<i64> {
        self.event_date.map(|date| (date - self.now).num_days())
    }

    fn open(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.is_done())
    }

    /// Todo or in progress, and not blocked.
    fn actionable(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| is_actionable(t))
    }
}

fn is_actionable(task: &Task) -> bool {
    matches!(task.status, TaskStatus::Todo | TaskStatus::InProgress) && !task.is_blocked
}

const CHECKS: &[(&str, fn(&InsightContext<'_>) -> Vec<Insight>)] = &[
    ("blocked", blocked),
    ("overdue", overdue),
    ("prioritization", prioritization),
    ("workload", workload),
    ("phase_progress", phase_progress),
    ("timeline_risk", timeline_risk),
    ("resource_gaps", resource_gaps),
    ("dependencies", dependencies),
];

/// Run every check in table order.
pub fn insights(ctx: &InsightContext<'_>) -> Vec<Insight> {
    CHECKS.iter().flat_map(|(_, check)| check(ctx)).collect()
}

fn insight(check: &str, kind: InsightKind, area: InsightArea, impact: Impact) -> Insight {
    Insight {
        check: check.to_string(),
        kind,
        area,
        impact,
        title: String::new(),
        message: String::new(),
        recommendation: None,
        task_ids: Vec::new(),
    }
}

fn ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    tasks.into_iter().map(|t| t.id.clone()).collect()
}

fn titles(tasks: &[&Task], n: usize) -> String {
    tasks
        .iter()
        .take(n)
        .map(|t| t.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn blocked(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let blocked: Vec<&Task> = ctx.open().filter(|t| t.is_blocked).collect();
    if blocked.is_empty() {
        return Vec::new();
    }

    let mut by_reason: Vec<(&str, Vec<&Task>)> = Vec::new();
    for &task in &blocked {
        let reason = task.blocking_reason.as_deref().unwrap_or("unspecified");
        match by_reason.iter_mut().find(|(r, _)| *r == reason) {
            Some((_, group)) => group.push(task),
            None => by_reason.push((reason, vec![task])),
        }
    }

    let mut out = Vec::new();
    let critical: Vec<&Task> = blocked
        .iter()
        .copied()
        .filter(|t| t.priority == Priority::Critical)
        .collect();
    if !critical.is_empty() {
        let mut i = insight("blocked_critical", InsightKind::Warning, InsightArea::Dependencies, Impact::Critical);
        i.title = "Critical tasks blocked".into();
        i.message = format!("{} critical task(s) are blocked: {}", critical.len(), titles(&critical, 3));
        i.recommendation = Some("Clear these blockers before anything else.".into());
        i.task_ids = ids(critical);
        out.push(i);
    }

    for (reason, group) in by_reason {
        let mut i = insight("blocked", InsightKind::Warning, InsightArea::Dependencies, Impact::High);
        i.title = format!("{} task(s) blocked", group.len());
        i.message = format!("Blocked by: {reason}");
        i.recommendation = Some("Resolve the blocker or reassign the work.".into());
        i.task_ids = ids(group);
        out.push(i);
    }
    out
}

fn overdue(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let mut very = Vec::new();
    let mut moderate = Vec::new();
    let mut slight = Vec::new();
    for task in ctx.tasks.iter().filter(|t| t.is_overdue(ctx.now) && !t.is_blocked) {
        let Some(due) = task.due_date else { continue };
        match (ctx.now - due).num_days() {
            8.. => very.push(task),
            4..=7 => moderate.push(task),
            _ => slight.push(task),
        }
    }

    let tiers = [
        (very, Impact::Critical, "more than a week"),
        (moderate, Impact::High, "4 to 7 days"),
        (slight, Impact::Medium, "up to 3 days"),
    ];
    tiers
        .into_iter()
        .filter(|(group, _, _)| !group.is_empty())
        .map(|(group, impact, span)| {
            let mut i = insight("overdue", InsightKind::Warning, InsightArea::Timeline, impact);
            i.title = format!("{} task(s) overdue by {span}", group.len());
            i.message = titles(&group, 3);
            i.recommendation = Some("Reschedule or finish these tasks.".into());
            i.task_ids = ids(group);
            i
        })
        .collect()
}

fn prioritization(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let mut scored: Vec<(&Task, f64)> = ctx
        .actionable()
        .map(|t| (t, priority_score(t, ctx.event_date, ctx.now)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut out = Vec::new();
    let todo = scored.iter().filter(|(t, _)| t.status == TaskStatus::Todo).count();
    if todo > 3 {
        let top: Vec<&Task> = scored
            .iter()
            .take(5)
            .map(|(t, _)| *t)
            .filter(|t| t.status == TaskStatus::Todo)
            .collect();
        if !top.is_empty() {
            let mut i = insight("high_value_todo", InsightKind::Suggestion, InsightArea::Priority, Impact::High);
            i.title = "High-priority tasks need attention".into();
            i.message = format!("Start with: {}", titles(&top, 2));
            i.recommendation = Some("Move these tasks to in progress first.".into());
            i.task_ids = ids(top);
            out.push(i);
        }
    }

    let slow: Vec<&Task> = scored
        .iter()
        .map(|(t, _)| *t)
        .filter(|t| {
            t.status == TaskStatus::InProgress
                && matches!(t.priority, Priority::Medium | Priority::Low)
                && t.due_date.is_some_and(|due| (due - ctx.now).num_days() > 14)
        })
        .collect();
    if slow.len() > 2 {
        let mut i = insight("low_priority_in_progress", InsightKind::Tip, InsightArea::Resources, Impact::Medium);
        i.title = "Consider pausing low-priority work".into();
        i.message = format!("{} low-priority tasks are in progress with distant due dates.", slow.len());
        i.recommendation = Some("Shift effort to tasks due sooner.".into());
        i.task_ids = ids(slow);
        out.push(i);
    }
    out
}

fn workload(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let mut out = Vec::new();

    let mut per_person: Vec<(&str, usize)> = Vec::new();
    for name in ctx.open().filter_map(|t| t.assignee.as_deref()) {
        match per_person.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => per_person.push((name, 1)),
        }
    }
    per_person.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    if let (Some(&(busiest, max)), Some(&(_, min))) = (per_person.first(), per_person.last()) {
        if per_person.len() >= 2 && max > min * 2 && max > 3 {
            let mut i = insight("workload_imbalance", InsightKind::Suggestion, InsightArea::Resources, Impact::Medium);
            i.title = "Workload imbalance".into();
            i.message = format!("{busiest} has {max} open tasks while others have as few as {min}.");
            i.recommendation = Some(format!("Redistribute some of {busiest}'s tasks."));
            i.task_ids = ids(ctx.open().filter(|t| t.assignee.as_deref() == Some(busiest)));
            out.push(i);
        }
    }

    let unassigned: Vec<&Task> = ctx.open().filter(|t| t.assignee.is_none()).collect();
    if unassigned.len() > 2 {
        let mut i = insight("unassigned", InsightKind::Tip, InsightArea::Resources, Impact::Medium);
        i.title = format!("{} open tasks have no owner", unassigned.len());
        i.message = "Unowned work tends to slip.".into();
        i.recommendation = Some("Assign an owner to each open task.".into());
        i.task_ids = ids(unassigned.into_iter().take(5));
        out.push(i);
    }
    out
}

fn phase_progress(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let current = ctx.current_phase.index();
    let mut out = Vec::new();
    for phase in Phase::ALL {
        let tasks: Vec<&Task> = ctx.tasks.iter().filter(|t| t.phase == Some(phase)).collect();
        if tasks.is_empty() {
            continue;
        }
        let done = tasks.iter().filter(|t| t.is_done()).count();
        let ratio = done as f64 / tasks.len() as f64;

        if phase.index() < current && ratio < 0.8 {
            let mut i = insight("phase_behind", InsightKind::Warning, InsightArea::Quality, Impact::High);
            i.title = format!("{} phase is behind", phase.display_name());
            i.message = format!(
                "Only {done} of {} tasks are done although the workflow has moved on.",
                tasks.len()
            );
            i.recommendation = Some(format!("Finish the remaining {} tasks.", phase.display_name()));
            i.task_ids = ids(tasks.into_iter().filter(|t| !t.is_done()));
            out.push(i);
        } else if phase == ctx.current_phase && ratio >= 0.9 {
            let mut i = insight("phase_ready", InsightKind::Suggestion, InsightArea::Quality, Impact::Low);
            i.title = format!("{} phase is nearly complete", phase.display_name());
            i.message = format!("{done} of {} tasks are done.", tasks.len());
            i.recommendation = Some("Wrap up and start on the next phase.".into());
            out.push(i);
        }
    }
    out
}

fn timeline_risk(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let Some(days_left) = ctx.days_until_event().filter(|d| *d > 0) else {
        return Vec::new();
    };
    let mut out = Vec::new();

    let critical: Vec<&Task> = ctx
        .open()
        .filter(|t| !t.is_blocked)
        .filter(|t| {
            t.due_date.is_some_and(|due| {
                let days = (due - ctx.now).num_days() as f64;
                days < estimate_effort(t) * 0.5
            })
        })
        .collect();
    if !critical.is_empty() {
        let mut i = insight("tasks_at_risk", InsightKind::Warning, InsightArea::Timeline, Impact::Critical);
        i.title = format!("{} task(s) at risk of missing their due date", critical.len());
        i.message = titles(&critical, 3);
        i.recommendation = Some("Add people or move the due dates.".into());
        i.task_ids = ids(critical);
        out.push(i);
    }

    let remaining = ctx.open().filter(|t| !t.is_blocked).count();
    if remaining > 0 {
        let per_task = days_left as f64 / remaining as f64;
        let pressure = if per_task < 1.0 {
            Some((Impact::Critical, "Severe time pressure"))
        } else if per_task < 2.0 {
            Some((Impact::High, "Tight timeline"))
        } else {
            None
        };
        if let Some((impact, title)) = pressure {
            let mut i = insight("time_pressure", InsightKind::Warning, InsightArea::Timeline, impact);
            i.title = title.into();
            i.message = format!("{remaining} open tasks with {days_left} day(s) left ({per_task:.1} days per task).");
            i.recommendation = Some("Cut scope or bring in more help.".into());
            out.push(i);
        }
    }
    out
}

fn resource_gaps(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let gaps = [
        (Category::Speakers, InsightKind::Tip, "Many speaker tasks open", "Batch speaker outreach and confirmations."),
        (Category::Marketing, InsightKind::Suggestion, "Marketing backlog is growing", "Schedule promotion in one batch."),
    ];
    gaps.into_iter()
        .filter_map(|(category, kind, title, recommendation)| {
            let open: Vec<&Task> = ctx.open().filter(|t| t.category == Some(category)).collect();
            (open.len() > 5).then(|| {
                let mut i = insight("resource_gap", kind, InsightArea::Resources, Impact::Medium);
                i.title = title.into();
                i.message = format!("{} open {} tasks.", open.len(), category.as_str());
                i.recommendation = Some(recommendation.into());
                i.task_ids = ids(open);
                i
            })
        })
        .collect()
}

fn dependencies(ctx: &InsightContext<'_>) -> Vec<Insight> {
    let mut out = Vec::new();

    let blocked: Vec<&Task> = ctx.open().filter(|t| t.is_blocked).collect();
    if blocked.len() > 3 {
        let mut i = insight("many_blocked", InsightKind::Warning, InsightArea::Dependencies, Impact::High);
        i.title = "Many tasks are blocked".into();
        i.message = format!("{} tasks are waiting on something.", blocked.len());
        i.recommendation = Some("Hold a session to clear blockers.".into());
        i.task_ids = ids(blocked);
        out.push(i);
    }

    let mut heaviest: Option<(Phase, usize)> = None;
    for phase in Phase::ALL {
        let count = ctx.open().filter(|t| t.phase == Some(phase)).count();
        if heaviest.is_none_or(|(_, best)| count > best) {
            heaviest = Some((phase, count));
        }
    }
    if let Some((phase, count)) = heaviest.filter(|(_, count)| *count > 8) {
        let mut i = insight("heavy_phase", InsightKind::Tip, InsightArea::Dependencies, Impact::Medium);
        i.title = "Heavy workload".into();
        i.message = format!("{} phase has {count} open tasks.", phase.display_name());
        i.recommendation = Some("Split the phase into smaller batches.".into());
        out.push(i);
    }
    out
}

/// Urgency score for one task. Higher means more urgent.
pub fn priority_score(task: &Task, event_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let mut score = match task.priority {
        Priority::Critical => 4.0,
        Priority::High => 3.0,
        Priority::Medium => 2.0,
        Priority::Low => 1.0,
    };

    let urgency = if task.is_blocked {
        4.0
    } else {
        match task.status {
            TaskStatus::InProgress => 3.0,
            TaskStatus::Todo => 2.0,
            TaskStatus::Review => 1.5,
            TaskStatus::Done => 0.0,
        }
    };
    score += urgency * 0.3;

    if let Some(due) = task.due_date {
        score += match (due - now).num_days() {
            ..=-1 => 2.0,
            0..=3 => 1.5,
            4..=7 => 1.0,
            8..=14 => 0.5,
            _ => 0.0,
        };
    }

    if let Some(date) = event_date {
        let importance = match task.category {
            Some(Category::Venue | Category::Speakers) => 1.0,
            Some(Category::Logistics | Category::Registration) => 0.8,
            _ => 0.5,
        };
        score += (30 - (date - now).num_days()) as f64 * importance * 0.02;
    }

    score
}

/// Suggest raising under-prioritized urgent tasks and lowering
/// over-prioritized ones. Only actionable tasks are considered.
pub fn recommend_priorities(
    tasks: &[Task],
    event_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Vec<PriorityRecommendation> {
    tasks
        .iter()
        .filter(|t| is_actionable(t))
        .filter_map(|task| {
            let score = priority_score(task, event_date, now);
            let urgent = matches!(task.priority, Priority::Critical | Priority::High);
            let suggested = if score >= 3.5 && !urgent {
                Priority::High
            } else if score <= 1.5 && urgent {
                Priority::Medium
            } else {
                return None;
            };
            Some(PriorityRecommendation {
                task_id: task.id.clone(),
                title: task.title.clone(),
                current: task.priority,
                suggested,
                score,
                factors: factors(task, now),
            })
        })
        .collect()
}

fn factors(task: &Task, now: DateTime<Utc>) -> Vec<String> {
    let mut out = Vec::new();
    if matches!(task.priority, Priority::Critical | Priority::High) {
        out.push(format!("Marked as {} priority", task.priority.as_str()));
    }
    if let Some(due) = task.due_date {
        let days = (due - now).num_days();
        if due < now {
            out.push("Task is overdue".to_string());
        } else if days <= 7 {
            out.push(format!("Due in {days} days"));
        }
    }
    match task.status {
        TaskStatus::InProgress => out.push("Already in progress".to_string()),
        TaskStatus::Todo => out.push("Not yet started".to_string()),
        _ => {}
    }
    if task.is_blocked {
        out.push("Task is blocked".to_string());
    }
    match &task.assignee {
        Some(name) => out.push(format!("Assigned to {name}")),
        None => out.push("Unassigned".to_string()),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap()
    }

    fn task(id: &str, phase: Phase, category: Category) -> Task {
        Task {
            id: id.into(),
            event_id: "e1".into(),
            title: format!("Task {id}"),
            description: None,
            phase: Some(phase),
            category: Some(category),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: Some("ana".into()),
            due_date: None,
            is_blocked: false,
            blocking_reason: None,
            created_at: now(),
            updated_at: now(),
            completed_at: None,
        }
    }

    fn run(tasks: &[Task], current_phase: Phase, event_date: Option<DateTime<Utc>>) -> Vec<Insight> {
        insights(&InsightContext {
            tasks,
            current_phase,
            event_date,
            now: now(),
        })
    }

    fn checks(found: &[Insight]) -> Vec<&str> {
        found.iter().map(|i| i.check.as_str()).collect()
    }

    fn block(mut t: Task, reason: &str) -> Task {
        t.is_blocked = true;
        t.blocking_reason = Some(reason.into());
        t
    }

    #[test]
    fn test_quiet_event_has_no_insights() {
        let tasks = vec![task("a", Phase::Ideation, Category::Content)];
        assert!(run(&tasks, Phase::Ideation, None).is_empty());
    }

    #[test]
    fn test_blocked_grouped_by_reason_with_critical_first() {
        let mut urgent = block(task("a", Phase::Logistics, Category::Venue), "contract");
        urgent.priority = Priority::Critical;
        let tasks = vec![
            urgent,
            block(task("b", Phase::Logistics, Category::Venue), "contract"),
            block(task("c", Phase::Marketing, Category::Marketing), "budget"),
        ];
        let found = run(&tasks, Phase::Ideation, None);
        let blocked: Vec<&Insight> = found.iter().filter(|i| i.check.starts_with("blocked")).collect();

        assert_eq!(blocked.len(), 3);
        assert_eq!(blocked[0].check, "blocked_critical");
        assert_eq!(blocked[0].impact, Impact::Critical);
        assert_eq!(blocked[0].task_ids, vec!["a"]);
        assert_eq!(blocked[1].message, "Blocked by: contract");
        assert_eq!(blocked[1].task_ids, vec!["a", "b"]);
        assert_eq!(blocked[2].message, "Blocked by: budget");
    }

    #[test]
    fn test_overdue_tiers() {
        let late = |id: &str, days: i64| {
            let mut t = task(id, Phase::Logistics, Category::Catering);
            t.due_date = Some(now() - Duration::days(days));
            t
        };
        let mut done = late("d", 20);
        done.status = TaskStatus::Done;
        let tasks = vec![
            late("a", 10),
            late("b", 5),
            late("c", 1),
            done,
            block(late("e", 10), "vendor"),
        ];
        let overdue: Vec<Insight> = run(&tasks, Phase::Ideation, None)
            .into_iter()
            .filter(|i| i.check == "overdue")
            .collect();

        let tiers: Vec<(Impact, Vec<String>)> = overdue.into_iter().map(|i| (i.impact, i.task_ids)).collect();
        assert_eq!(
            tiers,
            vec![
                (Impact::Critical, vec!["a".to_string()]),
                (Impact::High, vec!["b".to_string()]),
                (Impact::Medium, vec!["c".to_string()]),
            ]
        );
    }

    #[test]
    fn test_high_value_todo_needs_backlog() {
        let mut tasks: Vec<Task> = (0..4)
            .map(|n| task(&n.to_string(), Phase::Marketing, Category::Marketing))
            .collect();
        tasks[2].priority = Priority::Critical;
        let found = run(&tasks, Phase::Ideation, None);
        let todo = found.iter().find(|i| i.check == "high_value_todo").unwrap();
        assert_eq!(todo.task_ids[0], "2");
        assert_eq!(todo.task_ids.len(), 4);

        tasks.truncate(3);
        assert!(!checks(&run(&tasks, Phase::Ideation, None)).contains(&"high_value_todo"));
    }

    #[test]
    fn test_low_priority_in_progress_with_distant_due() {
        let slow = |id: &str| {
            let mut t = task(id, Phase::Preparation, Category::Content);
            t.status = TaskStatus::InProgress;
            t.priority = Priority::Low;
            t.due_date = Some(now() + Duration::days(30));
            t
        };
        let mut tasks = vec![slow("a"), slow("b"), slow("c")];
        assert!(checks(&run(&tasks, Phase::Ideation, None)).contains(&"low_priority_in_progress"));

        tasks[2].priority = Priority::High;
        assert!(!checks(&run(&tasks, Phase::Ideation, None)).contains(&"low_priority_in_progress"));
    }

    #[test]
    fn test_workload_imbalance_names_busiest() {
        let mut tasks: Vec<Task> = (0..4)
            .map(|n| task(&format!("a{n}"), Phase::Logistics, Category::Logistics))
            .collect();
        let mut other = task("b0", Phase::Logistics, Category::Logistics);
        other.assignee = Some("bo".into());
        tasks.push(other);

        let found = run(&tasks, Phase::Ideation, None);
        let imbalance = found.iter().find(|i| i.check == "workload_imbalance").unwrap();
        assert!(imbalance.message.starts_with("ana has 4"));
        assert_eq!(imbalance.task_ids.len(), 4);

        // One assignee only: nothing to compare against.
        tasks.pop();
        assert!(!checks(&run(&tasks, Phase::Ideation, None)).contains(&"workload_imbalance"));
    }

    #[test]
    fn test_unassigned_tip_after_two() {
        let free = |id: &str| {
            let mut t = task(id, Phase::Ideation, Category::Content);
            t.assignee = None;
            t
        };
        let mut tasks = vec![free("a"), free("b")];
        assert!(!checks(&run(&tasks, Phase::Ideation, None)).contains(&"unassigned"));
        tasks.push(free("c"));
        assert!(checks(&run(&tasks, Phase::Ideation, None)).contains(&"unassigned"));
    }

    #[test]
    fn test_phase_behind_and_ready() {
        let mut tasks: Vec<Task> = (0..10)
            .map(|n| task(&format!("m{n}"), Phase::Marketing, Category::Marketing))
            .collect();
        for t in tasks.iter_mut().take(9) {
            t.status = TaskStatus::Done;
        }
        let mut lagging = task("i0", Phase::Ideation, Category::Content);
        lagging.status = TaskStatus::Done;
        tasks.push(lagging);
        tasks.push(task("i1", Phase::Ideation, Category::Content));

        let found = run(&tasks, Phase::Marketing, None);
        let behind = found.iter().find(|i| i.check == "phase_behind").unwrap();
        assert_eq!(behind.title, "Ideation & Planning phase is behind");
        assert_eq!(behind.task_ids, vec!["i1"]);
        assert!(checks(&found).contains(&"phase_ready"));
    }

    #[test]
    fn test_timeline_risk_and_pressure() {
        let mut rushed = task("a", Phase::Execution, Category::Logistics);
        rushed.priority = Priority::Critical;
        rushed.due_date = Some(now() + Duration::hours(12));
        let tasks = vec![rushed, task("b", Phase::Execution, Category::Logistics)];

        // Two open tasks, three days left: 1.5 days each.
        let found = run(&tasks, Phase::Ideation, Some(now() + Duration::days(3)));
        let risk = found.iter().find(|i| i.check == "tasks_at_risk").unwrap();
        assert_eq!(risk.task_ids, vec!["a"]);
        let pressure = found.iter().find(|i| i.check == "time_pressure").unwrap();
        assert_eq!(pressure.title, "Tight timeline");
        assert_eq!(pressure.impact, Impact::High);

        let found = run(&tasks, Phase::Ideation, Some(now() + Duration::days(1)));
        let pressure = found.iter().find(|i| i.check == "time_pressure").unwrap();
        assert_eq!(pressure.impact, Impact::Critical);

        // Past events and undated events are skipped.
        assert!(!checks(&run(&tasks, Phase::Ideation, Some(now() - Duration::days(2)))).contains(&"tasks_at_risk"));
        assert!(!checks(&run(&tasks, Phase::Ideation, None)).contains(&"time_pressure"));
    }

    #[test]
    fn test_resource_gaps() {
        let mut tasks: Vec<Task> = (0..6)
            .map(|n| task(&format!("s{n}"), Phase::Ideation, Category::Speakers))
            .collect();
        tasks.extend((0..5).map(|n| task(&format!("k{n}"), Phase::Marketing, Category::Marketing)));
        let gaps: Vec<Insight> = run(&tasks, Phase::Ideation, None)
            .into_iter()
            .filter(|i| i.check == "resource_gap")
            .collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].kind, InsightKind::Tip);
        assert_eq!(gaps[0].task_ids.len(), 6);
    }

    #[test]
    fn test_dependencies_many_blocked_and_heavy_phase() {
        let tasks: Vec<Task> = (0..4)
            .map(|n| block(task(&format!("b{n}"), Phase::Logistics, Category::Venue), &format!("r{n}")))
            .collect();
        assert!(checks(&run(&tasks, Phase::Ideation, None)).contains(&"many_blocked"));

        let heavy: Vec<Task> = (0..9)
            .map(|n| task(&format!("p{n}"), Phase::Preparation, Category::Content))
            .collect();
        let found = run(&heavy, Phase::Ideation, None);
        let tip = found.iter().find(|i| i.check == "heavy_phase").unwrap();
        assert_eq!(tip.message, "Final Preparation phase has 9 open tasks.");
    }

    #[test]
    fn test_priority_score_components() {
        let mut t = task("a", Phase::Logistics, Category::Venue);
        // Medium 2 + todo 2 * 0.3.
        assert!((priority_score(&t, None, now()) - 2.6).abs() < 1e-9);

        t.due_date = Some(now() - Duration::days(1));
        assert!((priority_score(&t, None, now()) - 4.6).abs() < 1e-9);

        // Venue importance 1.0, ten days out: (30 - 10) * 0.02.
        t.due_date = None;
        let score = priority_score(&t, Some(now() + Duration::days(10)), now());
        assert!((score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommend_priorities() {
        let mut raise = task("a", Phase::Logistics, Category::Venue);
        raise.due_date = Some(now() + Duration::days(2));
        raise.status = TaskStatus::InProgress;

        let mut lower = task("b", Phase::Review, Category::Content);
        lower.priority = Priority::High;
        lower.assignee = None;

        let mut done = raise.clone();
        done.id = "c".into();
        done.status = TaskStatus::Done;

        let recs = recommend_priorities(&[raise, done], None, now());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].task_id, "a");
        assert_eq!(recs[0].suggested, Priority::High);
        assert!(recs[0].factors.contains(&"Due in 2 days".to_string()));
        assert!(recs[0].factors.contains(&"Already in progress".to_string()));

        // An event a year out pulls the content task well below 1.5.
        let recs = recommend_priorities(&[lower], Some(now() + Duration::days(365)), now());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].task_id, "b");
        assert_eq!(recs[0].suggested, Priority::Medium);
        assert_eq!(
            recs[0].factors,
            vec!["Marked as high priority", "Not yet started", "Unassigned"]
        );
    }
}
