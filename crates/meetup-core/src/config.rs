//! Application settings.
//!
//! Settings come from `.meetup/config.toml` when present and fall back to
//! built-in defaults. The `[workflow]` section is validated once, at
//! startup, into a [`WorkflowConfig`]; nothing downstream re-checks it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PlannerError, PlannerResult};
use crate::workflow::Phase;

/// Directory holding the database and config file, relative to the project dir.
pub const DATA_DIR: &str = ".meetup";

/// Config file name inside [`DATA_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "MEETUP_DB_PATH";

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database file. Relative paths resolve against the project directory.
    pub database_path: Option<PathBuf>,
    pub workflow: WorkflowSettings,
}

/// Raw, unvalidated `[workflow]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    pub weights: PhaseWeights,
    /// Share of a task in `review` counted toward phase progress (0.0..=1.0).
    pub review_credit: f64,
    /// Schedule pressure starts this many days before the event.
    pub at_risk_days: i64,
    /// Fraction of the time-proportional target an event may lag before it is off track.
    pub on_track_tolerance: f64,
    /// Open logistics speaker tasks needed before the "unconfirmed speakers" rule fires.
    pub speaker_threshold: usize,
    pub max_suggestions: usize,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            weights: PhaseWeights::default(),
            review_credit: 0.5,
            at_risk_days: 30,
            on_track_tolerance: 0.8,
            speaker_threshold: 1,
            max_suggestions: 5,
        }
    }
}

/// Percentage weight per phase. Every phase must be listed; the six values must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub ideation: u32,
    pub logistics: u32,
    pub marketing: u32,
    pub preparation: u32,
    pub execution: u32,
    pub review: u32,
}

impl Default for PhaseWeights {
    fn default() -> Self {
        Self {
            ideation: 10,
            logistics: 25,
            marketing: 25,
            preparation: 20,
            execution: 15,
            review: 5,
        }
    }
}

impl PhaseWeights {
    /// Weight of a single phase.
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Ideation => self.ideation,
            Phase::Logistics => self.logistics,
            Phase::Marketing => self.marketing,
            Phase::Preparation => self.preparation,
            Phase::Execution => self.execution,
            Phase::Review => self.review,
        }
    }

    pub fn total(&self) -> u32 {
        Phase::ALL.iter().map(|p| self.get(*p)).sum()
    }
}

impl Settings {
    /// Load settings for a project directory. A missing config file means defaults.
    pub fn load(project_dir: &Path) -> PlannerResult<Self> {
        let path = project_dir.join(DATA_DIR).join(CONFIG_FILE);
        let mut settings = if path.exists() {
            tracing::debug!(path = %path.display(), "Loading settings");
            Self::from_toml(&std::fs::read_to_string(&path)?)?
        } else {
            Self::default()
        };

        if let Ok(db_path) = std::env::var(DB_PATH_ENV) {
            settings.database_path = Some(PathBuf::from(db_path));
        }
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> PlannerResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Render settings as TOML (used by `meetup init`).
    pub fn to_toml(&self) -> PlannerResult<String> {
        toml::to_string_pretty(self).map_err(|e| PlannerError::config(e.to_string()))
    }

    /// Resolved database file location.
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        match &self.database_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => project_dir.join(p),
            None => project_dir.join(DATA_DIR).join("meetup.db"),
        }
    }

    /// Validate the workflow section.
    pub fn workflow_config(&self) -> PlannerResult<WorkflowConfig> {
        WorkflowConfig::new(self.workflow.clone())
    }
}

/// Validated workflow configuration, injected into the progress engine.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    settings: WorkflowSettings,
}

impl WorkflowConfig {
    /// Validate raw settings. Fails on weights that do not sum to 100 or
    /// ratios outside `0.0..=1.0`.
    pub fn new(settings: WorkflowSettings) -> PlannerResult<Self> {
        let total = settings.weights.total();
        if total != 100 {
            return Err(PlannerError::config(format!(
                "phase weights must sum to 100, got {total}"
            )));
        }
        if !(0.0..=1.0).contains(&settings.review_credit) {
            return Err(PlannerError::config(format!(
                "review_credit must be between 0 and 1, got {}",
                settings.review_credit
            )));
        }
        if !(0.0..=1.0).contains(&settings.on_track_tolerance) {
            return Err(PlannerError::config(format!(
                "on_track_tolerance must be between 0 and 1, got {}",
                settings.on_track_tolerance
            )));
        }
        if settings.at_risk_days < 0 {
            return Err(PlannerError::config("at_risk_days cannot be negative"));
        }
        Ok(Self { settings })
    }

    pub fn weights(&self) -> &PhaseWeights {
        &self.settings.weights
    }

    pub fn weight(&self, phase: Phase) -> u32 {
        self.settings.weights.get(phase)
    }

    pub fn review_credit(&self) -> f64 {
        self.settings.review_credit
    }

    pub fn at_risk_days(&self) -> i64 {
        self.settings.at_risk_days
    }

    pub fn on_track_tolerance(&self) -> f64 {
        self.settings.on_track_tolerance
    }

    pub fn speaker_threshold(&self) -> usize {
        self.settings.speaker_threshold
    }

    pub fn max_suggestions(&self) -> usize {
        self.settings.max_suggestions
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            settings: WorkflowSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(PhaseWeights::default().total(), 100);
        assert!(WorkflowConfig::new(WorkflowSettings::default()).is_ok());
    }

    #[test]
    fn test_bad_weight_sum_rejected() {
        let mut settings = WorkflowSettings::default();
        settings.weights.review = 10;
        let err = WorkflowConfig::new(settings).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.to_string().contains("105"));
    }

    #[test]
    fn test_review_credit_range_checked() {
        let settings = WorkflowSettings {
            review_credit: 1.5,
            ..WorkflowSettings::default()
        };
        assert!(WorkflowConfig::new(settings).is_err());
    }

    #[test]
    fn test_partial_weight_table_is_an_error() {
        let text = r#"
            [workflow.weights]
            ideation = 50
            logistics = 50
        "#;
        assert!(matches!(Settings::from_toml(text), Err(PlannerError::Toml(_))));
    }

    #[test]
    fn test_custom_weights_from_toml() {
        let text = r#"
            [workflow]
            review_credit = 0.0
            at_risk_days = 14

            [workflow.weights]
            ideation = 20
            logistics = 20
            marketing = 20
            preparation = 20
            execution = 10
            review = 10
        "#;
        let settings = Settings::from_toml(text).unwrap();
        let config = settings.workflow_config().unwrap();
        assert_eq!(config.weight(Phase::Execution), 10);
        assert_eq!(config.review_credit(), 0.0);
        assert_eq!(config.at_risk_days(), 14);
        assert_eq!(config.max_suggestions(), 5);
    }

    #[test]
    fn test_load_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join(DATA_DIR);
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join(CONFIG_FILE), "database_path = \"db/custom.db\"\n").unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        if std::env::var(DB_PATH_ENV).is_err() {
            assert_eq!(settings.db_path(dir.path()), dir.path().join("db/custom.db"));
        }
        assert_eq!(settings.workflow.weights, PhaseWeights::default());
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.workflow_config().is_ok());
    }

    #[test]
    fn test_to_toml_round_trip() {
        let text = Settings::default().to_toml().unwrap();
        let parsed = Settings::from_toml(&text).unwrap();
        assert_eq!(parsed.workflow.weights, PhaseWeights::default());
    }
}
