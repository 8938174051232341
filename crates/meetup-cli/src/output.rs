//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use meetup_core::event::model::{Event, EventStatus, EventType};
use meetup_core::milestone::tracker::{MilestoneState, MilestoneTimeline};
use meetup_core::task::model::{Board, BoardColumn, Priority, Task, TaskStatus};
use meetup_core::workflow::health::{RiskLevel, WorkflowAnalysis};
use meetup_core::workflow::insights::{Impact, InsightKind};
use meetup_core::workflow::model::{PhaseProgress, Severity, Suggestion, WorkflowProgress};
use meetup_core::workflow::templates::TemplateCatalog;
use unicode_width::UnicodeWidthStr;

const BAR_WIDTH: usize = 20;

/// First 8 characters of an id.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn date(d: &chrono::DateTime<chrono::Utc>) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn event_status_colored(status: EventStatus) -> ColoredString {
    match status {
        EventStatus::Planning => "planning".yellow(),
        EventStatus::Scheduled => "scheduled".cyan(),
        EventStatus::Completed => "completed".green(),
        EventStatus::Cancelled => "cancelled".dimmed(),
    }
}

/// Print events as a table.
pub fn print_events_table(events: &[Event]) {
    if events.is_empty() {
        println!("{}", "No events found. Create one with 'meetup event new <title>'.".dimmed());
        return;
    }

    println!(
        "{:<10} {} {:<12} {:<11} {:<10}",
        "ID",
        pad_right("Title", 32),
        "Status",
        "Date",
        "Type"
    );
    println!("{}", "─".repeat(78));

    for event in events {
        let when = event.scheduled_date.as_ref().map_or_else(|| "-".to_string(), date);
        println!(
            "{:<10} {} {:<12} {:<11} {:<10}",
            short_id(&event.id),
            pad_right(&truncate_visual(&event.title, 32), 32),
            event_status_colored(event.status),
            when,
            event.event_type.as_str()
        );
    }

    println!();
    println!("{} event(s)", events.len());
}

/// Print a single event.
pub fn print_event(event: &Event) {
    println!("{} {}", event.title.cyan().bold(), format!("({})", event.id).dimmed());
    println!();

    if let Some(desc) = &event.description {
        println!("{}", desc);
        println!();
    }

    println!("{}: {}", "Status".bold(), event_status_colored(event.status));
    println!("{}: {}", "Type".bold(), event.event_type.as_str());
    if let Some(topic) = &event.topic {
        println!("{}: {}", "Topic".bold(), topic);
    }
    match &event.scheduled_date {
        Some(d) => {
            let days = event.days_until(chrono::Utc::now()).unwrap_or(0);
            println!("{}: {} ({})", "Date".bold(), d.format("%Y-%m-%d %H:%M UTC"), days_label(days));
        }
        None => println!("{}: {}", "Date".bold(), "not scheduled".dimmed()),
    }
}

fn days_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        d if d > 0 => format!("in {d} days"),
        -1 => "yesterday".to_string(),
        d => format!("{} days ago", -d),
    }
}

fn task_status_colored(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Todo => "todo".normal(),
        TaskStatus::InProgress => "in_progress".yellow(),
        TaskStatus::Review => "review".cyan(),
        TaskStatus::Done => "done".green(),
    }
}

/// Print tasks as a table.
pub fn print_tasks_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }

    println!(
        "{:<10} {} {:<12} {:<10} {:<12}",
        "ID",
        pad_right("Title", 30),
        "Status",
        "Priority",
        "Phase"
    );
    println!("{}", "─".repeat(78));

    for task in tasks {
        let title = truncate_visual(&task.title, 28);
        let title = if task.is_blocked {
            format!("{} {}", "⊘".red(), pad_right(&title, 28))
        } else {
            pad_right(&title, 30)
        };
        println!(
            "{:<10} {} {:<12} {:<10} {:<12}",
            short_id(&task.id),
            title,
            task_status_colored(task.status),
            task.priority.as_str(),
            task.phase.map_or("-", |p| p.as_str())
        );
    }

    println!();
    println!("{} task(s) total", tasks.len());
}

/// Print a single task.
pub fn print_task(task: &Task) {
    println!("{} {}", task.title.cyan().bold(), format!("({})", task.id).dimmed());
    println!();

    if let Some(desc) = &task.description {
        println!("{}", desc);
        println!();
    }

    println!("{}: {}", "Status".bold(), task_status_colored(task.status));
    println!("{}: {}", "Priority".bold(), task.priority.as_str());
    println!(
        "{}: {}",
        "Phase".bold(),
        task.phase.map_or_else(|| "unclassified".dimmed(), |p| p.display_name().normal())
    );
    println!(
        "{}: {}",
        "Category".bold(),
        task.category.map_or_else(|| "unclassified".dimmed(), |c| c.as_str().normal())
    );
    if let Some(assignee) = &task.assignee {
        println!("{}: {}", "Assignee".bold(), assignee);
    }
    if let Some(due) = &task.due_date {
        let due_text = date(due);
        if task.is_overdue(chrono::Utc::now()) {
            println!("{}: {} {}", "Due".bold(), due_text.red(), "(overdue)".red());
        } else {
            println!("{}: {}", "Due".bold(), due_text);
        }
    }
    if task.is_blocked {
        println!(
            "{}: {}",
            "Blocked".red().bold(),
            task.blocking_reason.as_deref().unwrap_or_default()
        );
    }
    if let Some(done) = &task.completed_at {
        println!("{}: {}", "Completed".bold(), date(done).green());
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Column header text (plain, for width calculation).
fn column_header_plain(col: &BoardColumn, max_width: usize) -> String {
    let count = col.tasks.len();
    let suffix = if count > 0 { format!(" {count}") } else { String::new() };
    let full = format!("{}{}", col.name.to_uppercase(), suffix);
    truncate_visual(&full, max_width)
}

fn column_header_colored(col: &BoardColumn, max_width: usize) -> ColoredString {
    let label = column_header_plain(col, max_width);
    match col.status {
        TaskStatus::Todo => label.blue().bold(),
        TaskStatus::InProgress => label.yellow().bold(),
        TaskStatus::Review => label.magenta().bold(),
        TaskStatus::Done => label.green().bold(),
    }
}

fn priority_indicator(priority: Priority) -> ColoredString {
    match priority {
        Priority::Critical => "!!".red().bold(),
        Priority::High => "! ".yellow(),
        Priority::Medium => "· ".dimmed(),
        Priority::Low => "  ".dimmed(),
    }
}

/// One card in the wide board layout, padded to `width`.
fn format_task_card(task: &Task, status: TaskStatus, width: usize) -> String {
    // 2 chars for indicator + 1 space + title
    let title_w = if width > 4 { width - 3 } else { 1 };
    let title = pad_right(&truncate_visual(&task.title, title_w), title_w);

    if task.is_blocked {
        return format!("{} {}", "⊘ ".red(), title.red());
    }
    match status {
        TaskStatus::Todo => format!("{} {}", priority_indicator(task.priority), title),
        TaskStatus::InProgress => format!("{} {}", priority_indicator(task.priority), title.yellow()),
        TaskStatus::Review => format!("{} {}", priority_indicator(task.priority), title.magenta()),
        TaskStatus::Done => format!("{} {}", "✓ ".green(), title.green().dimmed()),
    }
}

/// Print the kanban board.
pub fn print_board(board: &Board) {
    let total_tasks: usize = board.columns.iter().map(|c| c.tasks.len()).sum();

    if total_tasks == 0 {
        println!(
            "{}",
            "No tasks yet. Add one with 'meetup task new' or seed them with 'meetup workflow init'.".dimmed()
        );
        return;
    }

    let width = term_width();

    if width < 60 {
        print_board_compact(board);
    } else {
        print_board_wide(board, width);
    }
}

fn print_border(left: &str, mid: &str, right: &str, num_cols: usize, col_width: usize) {
    print!("{}", left.dimmed());
    for i in 0..num_cols {
        print!("{}", "─".repeat(col_width).dimmed());
        if i < num_cols - 1 {
            print!("{}", mid.dimmed());
        }
    }
    println!("{}", right.dimmed());
}

/// Columns side by side.
fn print_board_wide(board: &Board, term_w: usize) {
    let columns: Vec<&BoardColumn> = board.columns.iter().collect();
    let num_cols = columns.len();
    let available = if term_w > num_cols + 1 { term_w - num_cols - 1 } else { num_cols * 10 };
    let col_width = (available / num_cols).clamp(12, 35);

    print_border("┌", "┬", "┐", num_cols, col_width);

    print!("{}", "│".dimmed());
    for (i, col) in columns.iter().enumerate() {
        let header_width = UnicodeWidthStr::width(column_header_plain(col, col_width).as_str());
        let padding = col_width.saturating_sub(header_width);
        let left_pad = padding / 2;
        print!(
            "{}{}{}",
            " ".repeat(left_pad),
            column_header_colored(col, col_width),
            " ".repeat(padding - left_pad)
        );
        if i < num_cols - 1 {
            print!("{}", "│".dimmed());
        }
    }
    println!("{}", "│".dimmed());

    print_border("├", "┼", "┤", num_cols, col_width);

    let max_tasks = columns.iter().map(|c| c.tasks.len()).max().unwrap_or(0);
    for row in 0..max_tasks {
        print!("{}", "│".dimmed());
        for (ci, col) in columns.iter().enumerate() {
            match col.tasks.get(row) {
                Some(task) => print!("{}", format_task_card(task, col.status, col_width)),
                None => print!("{}", " ".repeat(col_width)),
            }
            if ci < num_cols - 1 {
                print!("{}", "│".dimmed());
            }
        }
        println!("{}", "│".dimmed());
    }

    print_border("└", "┴", "┘", num_cols, col_width);

    let total: usize = columns.iter().map(|c| c.tasks.len()).sum();
    let done = columns
        .iter()
        .find(|c| c.status == TaskStatus::Done)
        .map_or(0, |c| c.tasks.len());
    let blocked: usize = columns
        .iter()
        .flat_map(|c| c.tasks.iter())
        .filter(|t| t.is_blocked)
        .count();
    print!(
        " {} {} tasks {} {} done ({}%)",
        "■".cyan(),
        total.to_string().bold(),
        "·".dimmed(),
        done.to_string().green(),
        (done * 100) / total.max(1)
    );
    if blocked > 0 {
        print!(" {} {} blocked", "·".dimmed(), blocked.to_string().red());
    }
    println!();
}

/// Vertical layout for narrow terminals.
fn print_board_compact(board: &Board) {
    println!("{}", " KANBAN BOARD ".on_blue().white().bold());
    println!();

    for col in &board.columns {
        if col.tasks.is_empty() {
            continue;
        }

        println!(" {} {}", "▸".dimmed(), column_header_colored(col, 30));

        for task in &col.tasks {
            let id_short = task.id.get(..6).unwrap_or(&task.id);
            let title: ColoredString = match col.status {
                _ if task.is_blocked => task.title.as_str().red(),
                TaskStatus::InProgress => task.title.as_str().yellow(),
                TaskStatus::Done => task.title.as_str().green().dimmed(),
                TaskStatus::Review => task.title.as_str().magenta(),
                TaskStatus::Todo => task.title.as_str().normal(),
            };
            println!("   {} {} {}", priority_indicator(task.priority), title, id_short.dimmed());
        }
        println!();
    }
}

/// A `[████░░░░]` bar for a percentage.
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn phase_line(p: &PhaseProgress) -> String {
    let marker = if p.is_completed {
        "✓".green()
    } else if p.is_active {
        "▶".cyan().bold()
    } else {
        " ".normal()
    };
    let bar = progress_bar(p.progress_percent, BAR_WIDTH);
    let bar = if p.is_completed {
        bar.green()
    } else if p.is_active {
        bar.cyan()
    } else {
        bar.dimmed()
    };
    let blocked = if p.has_blocked_tasks { " ⊘".red() } else { "".normal() };
    format!(
        " {} {} {} {:>5.1}%  {}/{} (w{}){}",
        marker,
        pad_right(p.name.as_str(), 24),
        bar,
        p.progress_percent,
        p.completed_task_count,
        p.total_task_count,
        p.weight,
        blocked
    )
}

/// Print a progress snapshot with one bar per phase.
pub fn print_progress(progress: &WorkflowProgress) {
    let track = if progress.is_on_track {
        "on track".green().bold()
    } else {
        "at risk".red().bold()
    };
    println!(
        "{} {:.1}% {} {}",
        "Overall".bold(),
        progress.overall_percent,
        "·".dimmed(),
        track
    );
    println!(
        "{} {}",
        "Current phase:".bold(),
        progress.current_phase.display_name().cyan()
    );
    if let Some(days) = progress.days_until_event {
        println!("{} {}", "Event:".bold(), days_label(days));
    }
    println!();

    for phase in &progress.phases {
        println!("{}", phase_line(phase));
    }

    let t = &progress.tasks;
    println!();
    println!(
        " {} todo {} in progress {} review {} done",
        t.todo,
        t.in_progress,
        t.review,
        t.done.to_string().green()
    );
    if t.blocked > 0 || t.overdue > 0 {
        println!(
            " {} blocked {} overdue",
            t.blocked.to_string().red(),
            t.overdue.to_string().yellow()
        );
    }
    if t.unclassified > 0 {
        println!(" {} unclassified (not counted)", t.unclassified.to_string().dimmed());
    }
    println!(
        " {}/{} milestones complete",
        progress.completed_milestones, progress.total_milestones
    );
    if let Some(next) = &progress.next_milestone {
        println!(
            " {} next: {} on {} ({})",
            "◆".cyan(),
            next.title,
            date(&next.due_date),
            days_label(next.days_until_due)
        );
    }

    if !progress.blockers.is_empty() {
        println!();
        println!("{}", "Blockers".red().bold());
        for b in &progress.blockers {
            println!("  {} {} {}", "⊘".red(), b.title.bold(), format!("({})", short_id(&b.task_id)).dimmed());
            println!("    {}", b.reason);
        }
    }

    if !progress.suggestions.is_empty() {
        println!();
        print_suggestions(&progress.suggestions);
    }
}

/// Print suggestions, warnings first as produced.
pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("{}", "No suggestions. Everything looks fine.".dimmed());
        return;
    }

    println!("{}", "Suggestions".bold());
    for s in suggestions {
        let icon = match s.severity {
            Severity::Warning => "⚠".yellow(),
            Severity::Tip => "→".cyan(),
        };
        println!("  {} {}", icon, s.message);
    }
}

/// Print the milestone timeline.
pub fn print_timeline(timeline: &MilestoneTimeline) {
    if timeline.is_empty() {
        println!(
            "{}",
            "No milestones. Add one with 'meetup milestone add' or run 'meetup workflow init'.".dimmed()
        );
        return;
    }

    if let (Some(start), Some(end)) = (&timeline.start, &timeline.end) {
        println!("{} {} → {}", "Timeline".bold(), date(start), date(end));
        println!();
    }

    for entry in &timeline.entries {
        let m = &entry.milestone;
        let (icon, title) = match entry.state {
            MilestoneState::Completed => ("✓".green(), m.title.as_str().green().dimmed()),
            MilestoneState::Overdue => ("!".red().bold(), m.title.as_str().red()),
            MilestoneState::Upcoming => ("○".cyan(), m.title.as_str().normal()),
        };
        let critical = if m.is_critical_path { "◆".yellow() } else { " ".normal() };
        let when = match entry.state {
            MilestoneState::Completed => String::new(),
            _ => days_label(entry.days_until_due),
        };
        println!(
            "  {} {} {} {} {:>3.0}%  {} {}",
            icon,
            critical,
            date(&m.due_date),
            pad_right(m.milestone_type.as_str(), 11),
            entry.position,
            title,
            when.dimmed()
        );
    }

    println!();
    println!(
        " {}/{} complete {} {} overdue {} {} on critical path",
        timeline.completed.to_string().green(),
        timeline.total,
        "·".dimmed(),
        timeline.overdue.to_string().red(),
        "·".dimmed(),
        timeline.critical_path.len()
    );
}

/// Print health score and forecast.
pub fn print_analysis(analysis: &WorkflowAnalysis) {
    let score = analysis.health_score.to_string();
    let score = match analysis.health_score {
        80..=100 => score.green().bold(),
        50..=79 => score.yellow().bold(),
        _ => score.red().bold(),
    };
    println!("{} {}/100", "Health".bold(), score);
    println!("{}", analysis.summary);

    match &analysis.forecast {
        Some(f) => {
            let risk = match f.risk {
                RiskLevel::Low => "low".green(),
                RiskLevel::Medium => "medium".yellow(),
                RiskLevel::High => "high".red().bold(),
            };
            println!();
            println!("{}", "Forecast".bold());
            println!("  {} open tasks, ~{:.1} days of effort", f.open_tasks, f.effort_days);
            println!("  {} people → {:.1} days needed", f.people, f.days_needed);
            if let Some(left) = f.days_left {
                println!("  {} days until the event", left);
            }
            println!("  predicted completion {}", date(&f.predicted_completion));
            println!("  risk: {}", risk);
        }
        None => {
            println!();
            println!("{}", "No open tasks left to forecast.".dimmed());
        }
    }

    if !analysis.insights.is_empty() {
        println!();
        println!("{}", "Insights".bold());
        for i in &analysis.insights {
            let icon = match i.kind {
                InsightKind::Warning => "⚠".yellow(),
                InsightKind::Suggestion => "•".cyan(),
                InsightKind::Tip => "→".dimmed(),
            };
            let impact = match i.impact {
                Impact::Critical => "critical".red().bold(),
                Impact::High => "high".red(),
                Impact::Medium => "medium".yellow(),
                Impact::Low => "low".normal(),
            };
            println!("  {} {} [{}]", icon, i.title.bold(), impact);
            if !i.message.is_empty() {
                println!("    {}", i.message);
            }
            if let Some(rec) = &i.recommendation {
                println!("    {}", rec.dimmed());
            }
        }
    }

    if !analysis.priority_recommendations.is_empty() {
        println!();
        println!("{}", "Priority changes".bold());
        for r in &analysis.priority_recommendations {
            println!(
                "  {} {} {} → {} (score {:.1})",
                short_id(&r.task_id).dimmed(),
                truncate_visual(&r.title, 40),
                r.current.as_str(),
                r.suggested.as_str().bold(),
                r.score
            );
            println!("    {}", r.factors.join("; ").dimmed());
        }
    }
}

/// Print built-in templates.
pub fn print_templates(catalog: &TemplateCatalog, only: Option<EventType>) {
    for group in catalog
        .milestones
        .iter()
        .filter(|g| only.is_none_or(|t| t == g.event_type))
    {
        println!("{} {}", "Milestones:".bold(), group.event_type.as_str().cyan().bold());
        for m in group.milestones {
            let offset = if m.days_before >= 0 {
                format!("T-{}", m.days_before)
            } else {
                format!("T+{}", -m.days_before)
            };
            let critical = if m.critical { "◆".yellow() } else { " ".normal() };
            println!("  {} {:>5}  {}", critical, offset, m.title);
        }
        println!();
    }

    if only.is_some() {
        return;
    }

    println!("{}", "Starter tasks".bold());
    let mut current = None;
    for t in catalog.tasks {
        if current != Some(t.phase) {
            println!("  {}", t.phase.display_name().cyan());
            current = Some(t.phase);
        }
        println!("    {} {} {}", priority_indicator(t.priority), t.title, format!("[{}]", t.category.as_str()).dimmed());
    }
}
