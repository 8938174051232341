//! CLI command definitions and handlers.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use meetup_core::event::model::{EventStatus, EventType};
use meetup_core::milestone::model::MilestoneType;
use meetup_core::task::model::{Category, Priority, TaskStatus};
use meetup_core::workflow::Phase;
use meetup_core::{timestamp, Settings, WorkflowConfig};
use meetup_db::DbPool;
use std::path::{Path, PathBuf};

pub mod event;
pub mod init;
pub mod milestone;
pub mod serve;
pub mod task;
pub mod workflow;

/// Meetup Planner - event planning with a kanban board and progress tracking
#[derive(Parser)]
#[command(name = "meetup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the .meetup directory, config file and database
    Init(init::InitArgs),

    /// Manage events
    #[command(subcommand)]
    Event(event::EventCommands),

    /// Task management (kanban)
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage milestones
    #[command(subcommand)]
    Milestone(milestone::MilestoneCommands),

    /// Workflow progress, suggestions and templates
    #[command(subcommand)]
    Workflow(workflow::WorkflowCommands),

    /// Start the JSON API and WebSocket server
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self, project_dir: &Path) -> Result<()> {
        match self.command {
            Commands::Init(args) => init::execute(args, project_dir),
            Commands::Event(cmd) => event::execute(cmd, project_dir),
            Commands::Task(cmd) => task::execute(cmd, project_dir),
            Commands::Milestone(cmd) => milestone::execute(cmd, project_dir),
            Commands::Workflow(cmd) => workflow::execute(cmd, project_dir),
            Commands::Serve(args) => serve::execute(args, project_dir).await,
        }
    }
}

/// An opened project: settings plus a migrated database.
pub struct Project {
    pub pool: DbPool,
    pub settings: Settings,
}

impl Project {
    /// Open the project in `project_dir`. Fails if `meetup init` has not run.
    pub fn open(project_dir: &Path) -> Result<Self> {
        let settings = Settings::load(project_dir)?;
        let db_path = settings.db_path(project_dir);
        if !db_path.exists() {
            bail!(
                "No planner database at {}. Run 'meetup init' first.",
                db_path.display()
            );
        }
        tracing::debug!(path = %db_path.display(), "Opening planner database");
        let pool = meetup_db::init_pool(&db_path)?;
        Ok(Self { pool, settings })
    }

    /// Validated workflow settings.
    pub fn workflow_config(&self) -> Result<WorkflowConfig> {
        Ok(self.settings.workflow_config()?)
    }
}

// Argument parsers for domain enums.

pub fn parse_phase(s: &str) -> Result<Phase, String> {
    Phase::from_str(s).ok_or_else(|| {
        format!("unknown phase '{s}' (ideation, logistics, marketing, preparation, execution, review)")
    })
}

pub fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).ok_or_else(|| {
        format!("unknown category '{s}' (speakers, venue, marketing, sponsors, catering, logistics, registration, content)")
    })
}

pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_str(s).ok_or_else(|| format!("unknown priority '{s}' (critical, high, medium, low)"))
}

pub fn parse_task_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(s).ok_or_else(|| format!("unknown status '{s}' (todo, in_progress, review, done)"))
}

pub fn parse_event_status(s: &str) -> Result<EventStatus, String> {
    EventStatus::from_str(s)
        .ok_or_else(|| format!("unknown status '{s}' (planning, scheduled, completed, cancelled)"))
}

pub fn parse_event_type(s: &str) -> Result<EventType, String> {
    EventType::from_str(s).ok_or_else(|| format!("unknown event type '{s}' (meetup, workshop, conference)"))
}

pub fn parse_milestone_type(s: &str) -> Result<MilestoneType, String> {
    MilestoneType::from_str(s)
        .ok_or_else(|| format!("unknown milestone type '{s}' (deliverable, deadline, event)"))
}

pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    timestamp::parse_user_date(s).map_err(|e| e.to_string())
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_new() {
        let cli = Cli::try_parse_from([
            "meetup", "task", "new", "evt-1", "Book venue", "--phase", "logistics", "--category", "venue",
            "--priority", "high", "--due", "2026-11-20",
        ])
        .unwrap();
        match cli.command {
            Commands::Task(task::TaskCommands::New(args)) => {
                assert_eq!(args.phase, Phase::Logistics);
                assert_eq!(args.category, Category::Venue);
                assert_eq!(args.priority, Priority::High);
                assert!(args.due.is_some());
            }
            _ => panic!("expected task new"),
        }
    }

    #[test]
    fn test_bad_enum_rejected() {
        assert!(Cli::try_parse_from(["meetup", "task", "move", "t1", "blocked"]).is_err());
        assert!(Cli::try_parse_from(["meetup", "event", "new", "Rust Night", "--date", "soon"]).is_err());
    }

    #[test]
    fn test_update_clear_flags() {
        let cli = Cli::try_parse_from(["meetup", "task", "update", "t1", "--clear-due"]).unwrap();
        match cli.command {
            Commands::Task(task::TaskCommands::Update(args)) => {
                assert!(args.clear_due);
                assert!(args.due.is_none());
            }
            _ => panic!("expected task update"),
        }
        assert!(Cli::try_parse_from([
            "meetup", "event", "update", "e1", "--date", "2026-12-01", "--clear-date",
        ])
        .is_err());
    }

    #[test]
    fn test_open_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        if std::env::var(meetup_core::config::DB_PATH_ENV).is_err() {
            assert!(Project::open(dir.path()).is_err());
        }
    }
}
