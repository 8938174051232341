//! Task management commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use meetup_core::task::{
    self,
    model::{Category, NewTask, Priority, TaskStatus, TaskUpdate},
};
use meetup_core::workflow::Phase;
use std::path::Path;

use super::{parse_category, parse_date, parse_phase, parse_priority, parse_task_status, print_json, Project};
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    New(NewTaskArgs),

    /// List an event's tasks
    List {
        /// Event ID
        event_id: String,
        /// Only tasks in this column
        #[arg(long, value_parser = parse_task_status)]
        status: Option<TaskStatus>,
    },

    /// Show one task
    Show {
        /// Task ID
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change task details
    Update(UpdateTaskArgs),

    /// Move a task to a different column
    Move {
        /// Task ID
        id: String,
        /// Target status (todo, in_progress, review, done)
        #[arg(value_parser = parse_task_status)]
        status: TaskStatus,
    },

    /// Flag a task as blocked
    Block {
        /// Task ID
        id: String,
        /// Why the task is blocked
        reason: String,
    },

    /// Clear a task's blocked flag
    Unblock {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Display the kanban board
    Board {
        /// Event ID
        event_id: String,
    },
}

#[derive(Args)]
pub struct NewTaskArgs {
    /// Event ID
    pub event_id: String,

    /// Task title
    pub title: String,

    /// Phase (ideation, logistics, marketing, preparation, execution, review)
    #[arg(long, value_parser = parse_phase)]
    pub phase: Phase,

    /// Category (speakers, venue, marketing, sponsors, catering, logistics, registration, content)
    #[arg(long, value_parser = parse_category)]
    pub category: Category,

    /// Priority (critical, high, medium, low)
    #[arg(long, value_parser = parse_priority, default_value = "medium")]
    pub priority: Priority,

    /// Person responsible
    #[arg(long)]
    pub assignee: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<DateTime<Utc>>,

    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct UpdateTaskArgs {
    /// Task ID
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = parse_phase)]
    pub phase: Option<Phase>,

    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,

    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub assignee: Option<String>,

    #[arg(long, value_parser = parse_date)]
    pub due: Option<DateTime<Utc>>,

    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,

    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(cmd: TaskCommands, project_dir: &Path) -> Result<()> {
    let project = Project::open(project_dir)?;
    let pool = &project.pool;

    match cmd {
        TaskCommands::New(args) => {
            let task = task::create_task(
                pool,
                &args.event_id,
                NewTask {
                    title: args.title,
                    description: args.description,
                    phase: args.phase,
                    category: args.category,
                    priority: args.priority,
                    assignee: args.assignee,
                    due_date: args.due,
                },
            )?;
            println!(
                "{} Created task: {} ({})",
                "✓".green().bold(),
                task.title.cyan(),
                task.id.dimmed()
            );
        }

        TaskCommands::List { event_id, status } => {
            let tasks = task::list_tasks(pool, &event_id, status)?;
            output::print_tasks_table(&tasks);
        }

        TaskCommands::Show { id, json } => {
            let task = task::get_task(pool, &id)?;
            if json {
                print_json(&task)?;
            } else {
                output::print_task(&task);
            }
        }

        TaskCommands::Update(args) => {
            let task = task::update_task(
                pool,
                &args.id,
                TaskUpdate {
                    title: args.title,
                    description: args.description,
                    phase: args.phase,
                    category: args.category,
                    priority: args.priority,
                    assignee: args.assignee,
                    due_date: if args.clear_due { Some(None) } else { args.due.map(Some) },
                },
            )?;
            println!("{} Updated task {}", "✓".green().bold(), task.title.cyan());
        }

        TaskCommands::Move { id, status } => {
            let task = task::move_task(pool, &id, status)?;
            println!(
                "{} Moved {} to {}",
                "✓".green().bold(),
                task.title.cyan(),
                status.display_name().bold()
            );
        }

        TaskCommands::Block { id, reason } => {
            let task = task::block_task(pool, &id, &reason)?;
            println!("{} Blocked {}: {}", "⊘".red().bold(), task.title.cyan(), reason);
        }

        TaskCommands::Unblock { id } => {
            let task = task::unblock_task(pool, &id)?;
            println!("{} Unblocked {}", "✓".green().bold(), task.title.cyan());
        }

        TaskCommands::Delete { id } => {
            task::delete_task(pool, &id)?;
            println!("{} Deleted task {}", "✓".green().bold(), id.dimmed());
        }

        TaskCommands::Board { event_id } => {
            let board = task::get_board(pool, &event_id)?;
            output::print_board(&board);
        }
    }

    Ok(())
}
