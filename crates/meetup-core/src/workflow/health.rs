//! Workflow health score and completion forecast.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::insights::{Insight, PriorityRecommendation};
use crate::task::model::{Priority, Task};

/// Tasks one person closes per day.
const TASKS_PER_PERSON_PER_DAY: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Estimated time to finish the remaining work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionForecast {
    pub open_tasks: usize,
    pub effort_days: f64,
    pub people: usize,
    pub days_needed: f64,
    pub days_left: Option<i64>,
    pub predicted_completion: DateTime<Utc>,
    pub risk: RiskLevel,
}

/// Health score, summary line, forecast and insights for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAnalysis {
    pub event_id: String,
    pub health_score: u8,
    pub summary: String,
    pub forecast: Option<CompletionForecast>,
    pub insights: Vec<Insight>,
    pub priority_recommendations: Vec<PriorityRecommendation>,
}

/// Score in 0..=100. Starts at 100, loses points for blocked, overdue and
/// unassigned work, gains a bonus past half and three quarters done.
pub fn health_score(tasks: &[Task], now: DateTime<Utc>) -> u8 {
    if tasks.is_empty() {
        return 100;
    }

    let blocked = tasks.iter().filter(|t| t.is_blocked).count() as i64;
    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count() as i64;
    let unassigned = tasks
        .iter()
        .filter(|t| t.assignee.is_none() && !t.is_done())
        .count() as i64;

    let mut score: i64 = 100 - blocked * 5 - overdue * 3 - unassigned * 2;

    let done_ratio = tasks.iter().filter(|t| t.is_done()).count() as f64 / tasks.len() as f64;
    if done_ratio > 0.5 {
        score += 5;
    }
    if done_ratio > 0.75 {
        score += 5;
    }

    score.clamp(0, 100) as u8
}

/// Days of effort for one task, by priority and description length.
pub fn estimate_effort(task: &Task) -> f64 {
    let base = match task.priority {
        Priority::Critical => 2.0,
        Priority::High => 1.5,
        Priority::Medium => 1.0,
        Priority::Low => 0.5,
    };
    let detail = task.description.as_deref().map_or(0, |d| d.chars().count());
    if detail > 200 {
        base * 1.5
    } else if detail > 100 {
        base * 1.25
    } else {
        base
    }
}

/// Forecast over open, unblocked tasks. `None` when nothing is left to do.
pub fn forecast(tasks: &[Task], event_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<CompletionForecast> {
    let open: Vec<&Task> = tasks.iter().filter(|t| !t.is_done() && !t.is_blocked).collect();
    if open.is_empty() {
        return None;
    }

    let effort_days: f64 = open.iter().map(|t| estimate_effort(t)).sum();
    let people = open
        .iter()
        .filter_map(|t| t.assignee.as_deref())
        .collect::<HashSet<_>>()
        .len()
        .max(1);
    let days_needed = effort_days / (TASKS_PER_PERSON_PER_DAY * people as f64);

    let days_left = event_date.map(|date| (date - now).num_days());
    let risk = match days_left {
        None => RiskLevel::Medium,
        Some(left) if days_needed > left as f64 => RiskLevel::High,
        Some(left) if days_needed > left as f64 * 0.7 => RiskLevel::Medium,
        Some(_) => RiskLevel::Low,
    };

    Some(CompletionForecast {
        open_tasks: open.len(),
        effort_days,
        people,
        days_needed,
        days_left,
        predicted_completion: now + Duration::seconds((days_needed * 86_400.0).round() as i64),
        risk,
    })
}

/// One-line verdict for a score.
pub fn summary(score: u8, warnings: usize) -> String {
    match score {
        90.. => "Workflow is healthy and on track. Great progress!".to_string(),
        70..=89 if warnings > 0 => format!("Workflow is stable with {warnings} warning(s) to address."),
        70..=89 => "Workflow is progressing well.".to_string(),
        50..=69 if warnings > 0 => format!("Attention needed: {warnings} warning(s) require action."),
        50..=69 => "Workflow has some issues that should be addressed.".to_string(),
        _ => format!("Critical attention required: {warnings} issue(s) need immediate action."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::{Category, TaskStatus};
    use crate::workflow::Phase;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 12, 0, 0).unwrap()
    }

    fn task(status: TaskStatus, priority: Priority, assignee: Option<&str>) -> Task {
        Task {
            id: "t".into(),
            event_id: "e1".into(),
            title: "Task".into(),
            description: None,
            phase: Some(Phase::Preparation),
            category: Some(Category::Content),
            status,
            priority,
            assignee: assignee.map(str::to_string),
            due_date: None,
            is_blocked: false,
            blocking_reason: None,
            created_at: now(),
            updated_at: now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_health_score_penalties_and_bonus() {
        assert_eq!(health_score(&[], now()), 100);

        let mut blocked = task(TaskStatus::InProgress, Priority::High, Some("ana"));
        blocked.is_blocked = true;
        blocked.blocking_reason = Some("waiting".into());
        let mut overdue = task(TaskStatus::Todo, Priority::Low, Some("ana"));
        overdue.due_date = Some(now() - Duration::days(2));
        let unassigned = task(TaskStatus::Todo, Priority::Low, None);
        assert_eq!(health_score(&[blocked, overdue, unassigned], now()), 90);

        // Unassigned but done costs nothing; both bonuses apply, then clamp.
        let all_done: Vec<Task> = (0..4).map(|_| task(TaskStatus::Done, Priority::Low, None)).collect();
        assert_eq!(health_score(&all_done, now()), 100);

        let mut half: Vec<Task> = (0..3).map(|_| task(TaskStatus::Done, Priority::Low, None)).collect();
        let mut late = task(TaskStatus::Todo, Priority::Low, None);
        late.due_date = Some(now() - Duration::days(1));
        half.push(late);
        half.push(task(TaskStatus::Todo, Priority::Low, None));
        // 3 of 5 done: +5; two unassigned open: -4; one overdue: -3.
        assert_eq!(health_score(&half, now()), 98);
    }

    #[test]
    fn test_health_score_is_bounded() {
        let many: Vec<Task> = (0..40)
            .map(|_| {
                let mut t = task(TaskStatus::Todo, Priority::Low, None);
                t.is_blocked = true;
                t.blocking_reason = Some("stuck".into());
                t
            })
            .collect();
        assert_eq!(health_score(&many, now()), 0);
    }

    #[test]
    fn test_effort_scales_with_description() {
        let mut t = task(TaskStatus::Todo, Priority::Critical, None);
        assert_eq!(estimate_effort(&t), 2.0);
        t.description = Some("x".repeat(150));
        assert_eq!(estimate_effort(&t), 2.5);
        t.description = Some("x".repeat(250));
        assert_eq!(estimate_effort(&t), 3.0);
    }

    #[test]
    fn test_forecast_risk_levels() {
        // Six medium tasks for one person: 6 / 3 = 2 days.
        let tasks: Vec<Task> = (0..6).map(|_| task(TaskStatus::Todo, Priority::Medium, None)).collect();

        let high = forecast(&tasks, Some(now() + Duration::days(1)), now()).unwrap();
        assert_eq!(high.risk, RiskLevel::High);
        assert!((high.days_needed - 2.0).abs() < 1e-9);

        let medium = forecast(&tasks, Some(now() + Duration::days(2)), now()).unwrap();
        assert_eq!(medium.risk, RiskLevel::Medium);

        let low = forecast(&tasks, Some(now() + Duration::days(30)), now()).unwrap();
        assert_eq!(low.risk, RiskLevel::Low);

        let undated = forecast(&tasks, None, now()).unwrap();
        assert_eq!(undated.risk, RiskLevel::Medium);
        assert_eq!(undated.predicted_completion, now() + Duration::days(2));
    }

    #[test]
    fn test_forecast_counts_people_and_skips_done() {
        let tasks = vec![
            task(TaskStatus::Todo, Priority::Medium, Some("ana")),
            task(TaskStatus::Todo, Priority::Medium, Some("bo")),
            task(TaskStatus::Done, Priority::Critical, Some("cy")),
        ];
        let f = forecast(&tasks, None, now()).unwrap();
        assert_eq!(f.open_tasks, 2);
        assert_eq!(f.people, 2);

        let all_done = vec![task(TaskStatus::Done, Priority::Low, None)];
        assert!(forecast(&all_done, None, now()).is_none());
    }

    #[test]
    fn test_summary_tiers() {
        assert!(summary(95, 3).contains("healthy"));
        assert!(summary(75, 2).contains("stable with 2"));
        assert_eq!(summary(75, 0), "Workflow is progressing well.");
        assert!(summary(55, 1).starts_with("Attention needed"));
        assert!(summary(10, 4).starts_with("Critical attention"));
    }
}
