//! Event commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use meetup_core::event::{
    self,
    model::{EventStatus, EventType, EventUpdate, NewEvent},
};
use std::path::Path;

use super::{parse_date, parse_event_status, parse_event_type, print_json, Project};
use crate::output;

#[derive(Subcommand)]
pub enum EventCommands {
    /// Create a new event
    New(NewEventArgs),

    /// List events, newest first
    List(ListEventsArgs),

    /// Show one event
    Show {
        /// Event ID
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change event details
    Update(UpdateEventArgs),

    /// Delete an event with its tasks and milestones
    Delete {
        /// Event ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewEventArgs {
    /// Event title
    pub title: String,

    /// Event date (YYYY-MM-DD or "YYYY-MM-DD HH:MM", UTC)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    /// Event type (meetup, workshop, conference)
    #[arg(long = "type", value_parser = parse_event_type, default_value = "meetup")]
    pub event_type: EventType,

    /// Topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ListEventsArgs {
    /// Only events with this status
    #[arg(long, value_parser = parse_event_status)]
    pub status: Option<EventStatus>,

    /// Maximum number of events
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Args)]
pub struct UpdateEventArgs {
    /// Event ID
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = parse_event_status)]
    pub status: Option<EventStatus>,

    #[arg(long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    /// Remove the scheduled date
    #[arg(long, conflicts_with = "date")]
    pub clear_date: bool,

    #[arg(long = "type", value_parser = parse_event_type)]
    pub event_type: Option<EventType>,

    #[arg(long)]
    pub topic: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(cmd: EventCommands, project_dir: &Path) -> Result<()> {
    let project = Project::open(project_dir)?;
    let pool = &project.pool;

    match cmd {
        EventCommands::New(args) => {
            let event = event::create_event(
                pool,
                NewEvent {
                    title: args.title,
                    description: args.description,
                    topic: args.topic,
                    event_type: args.event_type,
                    scheduled_date: args.date,
                },
            )?;
            println!(
                "{} Created {}: {} ({})",
                "✓".green().bold(),
                event.event_type.as_str(),
                event.title.cyan(),
                event.id.dimmed()
            );
            if event.scheduled_date.is_none() {
                println!("  {}", "Set a date with --date before running 'meetup workflow init'.".dimmed());
            }
        }

        EventCommands::List(args) => {
            let events = event::list_events(pool, args.status, args.limit, None)?;
            output::print_events_table(&events);
        }

        EventCommands::Show { id, json } => {
            let event = event::get_event(pool, &id)?;
            if json {
                print_json(&event)?;
            } else {
                output::print_event(&event);
            }
        }

        EventCommands::Update(args) => {
            let event = event::update_event(
                pool,
                &args.id,
                EventUpdate {
                    title: args.title,
                    description: args.description,
                    topic: args.topic,
                    status: args.status,
                    event_type: args.event_type,
                    scheduled_date: if args.clear_date { Some(None) } else { args.date.map(Some) },
                },
            )?;
            println!("{} Updated event {}", "✓".green().bold(), event.title.cyan());
        }

        EventCommands::Delete { id } => {
            event::delete_event(pool, &id)?;
            println!("{} Deleted event {}", "✓".green().bold(), id.dimmed());
        }
    }

    Ok(())
}
