//! Project initialization command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use meetup_core::config::{CONFIG_FILE, DATA_DIR};
use meetup_core::Settings;
use std::path::Path;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file with defaults
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InitArgs, project_dir: &Path) -> Result<()> {
    let data_dir = project_dir.join(DATA_DIR);
    std::fs::create_dir_all(&data_dir)?;

    let config_path = data_dir.join(CONFIG_FILE);
    if args.force || !config_path.exists() {
        std::fs::write(&config_path, Settings::default().to_toml()?)?;
        println!("{} Wrote {}", "✓".green().bold(), config_path.display());
    } else {
        println!("{} Keeping existing {}", "→".blue().bold(), config_path.display());
    }

    // Validate before touching the database so a bad config is caught early.
    let settings = Settings::load(project_dir)?;
    settings.workflow_config()?;

    let db_path = settings.db_path(project_dir);
    meetup_db::init_pool(&db_path)?;
    println!("{} Database ready: {}", "✓".green().bold(), db_path.display());

    println!();
    println!("{}", "Next steps:".bold());
    println!("  meetup event new \"Rust Night\" --date 2026-12-01   # Plan an event");
    println!("  meetup workflow init <event-id>                    # Seed milestones and tasks");
    println!("  meetup serve                                       # Start the API server");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_config_and_database() {
        let dir = tempfile::tempdir().unwrap();
        execute(InitArgs { force: false }, dir.path()).unwrap();
        assert!(dir.path().join(DATA_DIR).join(CONFIG_FILE).exists());

        // Running again keeps the file and still succeeds.
        execute(InitArgs { force: false }, dir.path()).unwrap();
    }
}
