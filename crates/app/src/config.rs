use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storage::JsonPaths;
use storage::json::{DEFAULT_BANK_FILE, DEFAULT_PROGRESS_FILE, DEFAULT_SCHEDULE_FILE};
use thiserror::Error;
use tracker_core::ReminderTime;
use tracker_core::reminder::default_reminder_times;

pub const CONFIG_ENV: &str = "STUDY_TRACKER_CONFIG";
pub const DATA_DIR_ENV: &str = "STUDY_TRACKER_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Runtime settings: where the JSON files live and when reminders fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub data_dir: PathBuf,
    pub bank_file: PathBuf,
    pub progress_file: PathBuf,
    pub schedule_file: PathBuf,
    pub reminder_times: Vec<ReminderTime>,
    pub poll_interval_secs: u64,
    /// Seed for schedule generation; random when unset.
    pub seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            bank_file: PathBuf::from(DEFAULT_BANK_FILE),
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            schedule_file: PathBuf::from(DEFAULT_SCHEDULE_FILE),
            reminder_times: default_reminder_times(),
            poll_interval_secs: 1,
            seed: None,
        }
    }
}

/// Values supplied on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub bank_file: Option<PathBuf>,
    pub progress_file: Option<PathBuf>,
    pub schedule_file: Option<PathBuf>,
}

impl TrackerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Default config location: `<config dir>/study-tracker/config.toml`.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("study-tracker").join("config.toml"))
    }

    /// Resolve config from defaults, a TOML file, the environment and CLI overrides.
    ///
    /// An explicitly named file (flag or `STUDY_TRACKER_CONFIG`) must exist; the
    /// default location is skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required file is missing, unparsable, or the
    /// resulting settings are invalid.
    pub fn resolve(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Some(dir) = env(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, overrides: &Overrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir.clone_from(dir);
        }
        if let Some(path) = &overrides.bank_file {
            self.bank_file.clone_from(path);
        }
        if let Some(path) = &overrides.progress_file {
            self.progress_file.clone_from(path);
        }
        if let Some(path) = &overrides.schedule_file {
            self.schedule_file.clone_from(path);
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for an empty or repeating reminder list, or a
    /// zero poll interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reminder_times.is_empty() {
            return Err(ConfigError::Invalid(
                "reminder_times must list at least one time".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.reminder_times.iter().find(|t| !seen.insert(**t)) {
            return Err(ConfigError::Invalid(format!(
                "reminder time {dup} is listed more than once"
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("poll_interval_secs must be > 0".into()));
        }
        Ok(())
    }

    /// File locations, with relative names resolved against `data_dir`.
    #[must_use]
    pub fn paths(&self) -> JsonPaths {
        JsonPaths {
            bank: self.data_dir.join(&self.bank_file),
            progress: self.data_dir.join(&self.progress_file),
            schedule: self.data_dir.join(&self.schedule_file),
        }
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
