//! Meetup Planner CLI
//!
//! Plan meetups, workshops and conferences from the terminal: events,
//! a kanban task board, milestones and workflow progress.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::{Cli, Commands};

const SERVE_FILTER: &str = "meetup=info,meetup_web=debug,meetup_core=info";

/// Initialize tracing. The returned guard flushes the log file on drop.
///
/// One-shot commands log warnings only (unless `--verbose`) so their
/// output stays readable; `serve` logs at info and can tee into a file.
fn init_tracing(log_file: Option<&Path>, verbose: bool, serving: bool) -> Option<WorkerGuard> {
    let default_filter = if serving || verbose { SERVE_FILTER } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        return None;
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let _ = std::fs::create_dir_all(dir);
    let file_name = path
        .file_name()
        .map_or_else(|| "serve.log".into(), |n| n.to_owned());
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    // Log to both the terminal and the file when --log is used
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match &cli.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let log_file: Option<PathBuf> = match &cli.command {
        Commands::Serve(args) if args.log => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| project_dir.join(".meetup/serve.log")),
        ),
        _ => None,
    };
    let serving = matches!(cli.command, Commands::Serve(_));
    let _guard = init_tracing(log_file.as_deref(), cli.verbose, serving);

    cli.execute(&project_dir).await
}
