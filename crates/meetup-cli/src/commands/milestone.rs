//! Milestone commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use meetup_core::milestone::{
    self,
    model::{MilestoneType, NewMilestone},
};
use meetup_core::workflow;
use std::path::Path;

use super::{parse_date, parse_milestone_type, print_json, Project};
use crate::output;

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Add a milestone to an event
    Add(AddMilestoneArgs),

    /// Show an event's milestone timeline
    List {
        /// Event ID
        event_id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a milestone completed
    Complete {
        /// Milestone ID
        id: String,
    },

    /// Reopen a completed milestone
    Reopen {
        /// Milestone ID
        id: String,
    },

    /// Delete a milestone
    Delete {
        /// Milestone ID
        id: String,
    },
}

#[derive(Args)]
pub struct AddMilestoneArgs {
    /// Event ID
    pub event_id: String,

    /// Milestone title
    pub title: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub due: DateTime<Utc>,

    /// Milestone type (deliverable, deadline, event)
    #[arg(long = "type", value_parser = parse_milestone_type, default_value = "deliverable")]
    pub milestone_type: MilestoneType,

    /// Mark as part of the critical path
    #[arg(long)]
    pub critical: bool,

    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(cmd: MilestoneCommands, project_dir: &Path) -> Result<()> {
    let project = Project::open(project_dir)?;
    let pool = &project.pool;

    match cmd {
        MilestoneCommands::Add(args) => {
            let m = milestone::create_milestone(
                pool,
                &args.event_id,
                NewMilestone {
                    title: args.title,
                    description: args.description,
                    milestone_type: args.milestone_type,
                    due_date: args.due,
                    is_critical_path: args.critical,
                },
            )?;
            println!(
                "{} Added milestone: {} due {} ({})",
                "✓".green().bold(),
                m.title.cyan(),
                m.due_date.format("%Y-%m-%d"),
                m.id.dimmed()
            );
        }

        MilestoneCommands::List { event_id, json } => {
            let timeline = workflow::milestone_timeline(pool, &event_id, Utc::now())?;
            if json {
                print_json(&timeline)?;
            } else {
                output::print_timeline(&timeline);
            }
        }

        MilestoneCommands::Complete { id } => {
            let m = milestone::complete_milestone(pool, &id)?;
            println!("{} Completed {}", "✓".green().bold(), m.title.cyan());
        }

        MilestoneCommands::Reopen { id } => {
            let m = milestone::reopen_milestone(pool, &id)?;
            println!("{} Reopened {}", "↺".yellow().bold(), m.title.cyan());
        }

        MilestoneCommands::Delete { id } => {
            milestone::delete_milestone(pool, &id)?;
            println!("{} Deleted milestone {}", "✓".green().bold(), id.dimmed());
        }
    }

    Ok(())
}
