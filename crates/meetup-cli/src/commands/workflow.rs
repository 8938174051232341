//! Workflow commands: initialization, progress, suggestions, analysis.

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;
use meetup_core::event::model::EventType;
use meetup_core::workflow::{self, templates};
use std::path::Path;

use super::{parse_event_type, print_json, Project};
use crate::output;

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// Seed an event with template milestones and starter tasks
    Init {
        /// Event ID
        event_id: String,
        /// Only create milestones
        #[arg(long)]
        no_tasks: bool,
    },

    /// Show the progress snapshot
    Progress {
        /// Event ID
        event_id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show rule-based suggestions
    Suggestions {
        /// Event ID
        event_id: String,
    },

    /// Health score and completion forecast
    Analyze {
        /// Event ID
        event_id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List built-in milestone and task templates
    Templates {
        /// Only this event type's milestones
        #[arg(long = "type", value_parser = parse_event_type)]
        event_type: Option<EventType>,
    },
}

pub fn execute(cmd: WorkflowCommands, project_dir: &Path) -> Result<()> {
    // Templates are static; no project needed.
    if let WorkflowCommands::Templates { event_type } = cmd {
        output::print_templates(&templates::catalog(), event_type);
        return Ok(());
    }

    let project = Project::open(project_dir)?;
    let config = project.workflow_config()?;
    let pool = &project.pool;
    let now = Utc::now();

    match cmd {
        WorkflowCommands::Init { event_id, no_tasks } => {
            let init = workflow::initialize_workflow(pool, &event_id, !no_tasks)?;
            println!(
                "{} Workflow initialized: {} milestones, {} tasks",
                "✓".green().bold(),
                init.milestones_created,
                init.tasks_created
            );
            println!();
            println!("  {} meetup task board {}", "→".dimmed(), event_id);
            println!("  {} meetup workflow progress {}", "→".dimmed(), event_id);
        }

        WorkflowCommands::Progress { event_id, json } => {
            let progress = workflow::calculate_progress(pool, &config, &event_id, now)?;
            if json {
                print_json(&progress)?;
            } else {
                output::print_progress(&progress);
            }
        }

        WorkflowCommands::Suggestions { event_id } => {
            let suggestions = workflow::list_suggestions(pool, &config, &event_id, now)?;
            output::print_suggestions(&suggestions);
        }

        WorkflowCommands::Analyze { event_id, json } => {
            let analysis = workflow::analyze(pool, &config, &event_id, now)?;
            if json {
                print_json(&analysis)?;
            } else {
                output::print_analysis(&analysis);
            }
        }

        WorkflowCommands::Templates { .. } => {}
    }

    Ok(())
}
