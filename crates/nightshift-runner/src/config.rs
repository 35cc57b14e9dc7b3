//! Configuration loading for the headless runner.
//!
//! The configuration lives in `nightshift.yaml`. Every field has a default,
//! so a missing file or a partial one still yields a runnable session.
//! `NIGHTSHIFT_SAVE_DIR` and `NIGHTSHIFT_SEED` override the file.

use std::path::{Path, PathBuf};

use nightshift_types::LocationId;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The starting location is not a known location id.
    #[error("unknown start location: {0}")]
    UnknownLocation(String),

    /// `NIGHTSHIFT_SEED` is not an unsigned integer.
    #[error("NIGHTSHIFT_SEED is not a number: {0}")]
    InvalidSeed(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level runner configuration. Mirrors `nightshift.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// Session pacing and randomness.
    #[serde(default)]
    pub session: SessionConfig,

    /// Where saves go and how often.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RunnerConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults. Environment
    /// overrides apply either way.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.session.start_location()?;
        Ok(config)
    }

    /// Override fields from `NIGHTSHIFT_SAVE_DIR` and `NIGHTSHIFT_SEED`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("NIGHTSHIFT_SAVE_DIR") {
            self.storage.dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("NIGHTSHIFT_SEED") {
            let seed = val
                .trim()
                .parse::<u64>()
                .map_err(|_parse| ConfigError::InvalidSeed(val.clone()))?;
            self.session.seed = Some(seed);
        }
        Ok(())
    }
}

/// Session pacing and randomness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Seed for a reproducible session. `None` draws from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. `None` runs until `:quit` or ctrl-c.
    #[serde(default)]
    pub max_ticks: Option<u64>,

    /// Location the player starts in.
    #[serde(default = "default_location")]
    pub location: String,
}

impl SessionConfig {
    /// The configured starting location.
    pub fn start_location(&self) -> Result<LocationId, ConfigError> {
        LocationId::parse(&self.location)
            .ok_or_else(|| ConfigError::UnknownLocation(self.location.clone()))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: None,
            location: default_location(),
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_location() -> String {
    LocationId::Hangar.as_str().to_owned()
}

/// Save slot location and autosave cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<key>.json` slot files.
    #[serde(default = "default_save_dir")]
    pub dir: PathBuf,

    /// Slot key.
    #[serde(default = "default_slot_key")]
    pub key: String,

    /// Seconds between autosaves.
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_save_dir(),
            key: default_slot_key(),
            autosave_secs: default_autosave_secs(),
        }
    }
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_slot_key() -> String {
    nightshift_save::DEFAULT_SLOT.to_owned()
}

const fn default_autosave_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = RunnerConfig::parse("{}").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.session.tick_interval_ms, 1_000);
        assert_eq!(config.storage.key, "nightshift");
        assert_eq!(config.session.start_location().unwrap(), LocationId::Hangar);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "session:\n  seed: 7\n  location: break_room\nstorage:\n  autosave_secs: 5\n";
        let config = RunnerConfig::parse(yaml).unwrap();
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.session.start_location().unwrap(), LocationId::BreakRoom);
        assert_eq!(config.session.tick_interval_ms, 1_000);
        assert_eq!(config.storage.autosave_secs, 5);
        assert_eq!(config.storage.dir, PathBuf::from("saves"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let result = RunnerConfig::parse("session:\n  location: roof\n");
        assert!(matches!(result, Err(ConfigError::UnknownLocation(loc)) if loc == "roof"));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("nightshift.yaml");
        if path.exists() {
            let config = RunnerConfig::parse(&std::fs::read_to_string(&path).unwrap());
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
