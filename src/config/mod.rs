//! Configuration management module
//!
//! Handles loading, saving, and validation of game setup limits and
//! user preferences.

use crate::{QuizError, Result, APP_NAME, CONFIG_FILE, LOG_FILE, MAX_QUESTIONS_PER_CATEGORY, MAX_TEAMS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Game configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Categories required before manual entry can start
    pub min_categories: usize,
    /// Initial questions-per-category value on the category setup screen
    pub default_question_count: usize,
    /// Maximum number of teams (never above 6)
    pub max_teams: usize,
    /// Directory that receives `jeopardy-questions.json`
    pub export_dir: PathBuf,
    /// How long notifications stay on screen, in seconds
    pub notification_secs: u64,
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_categories: 1,
            default_question_count: 5,
            max_teams: MAX_TEAMS,
            export_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            notification_secs: 3,
            tick_rate_ms: 250,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_categories == 0 {
            return Err(QuizError::ConfigError(
                "min_categories must be at least 1".to_string(),
            ));
        }

        if self.default_question_count == 0 || self.default_question_count > MAX_QUESTIONS_PER_CATEGORY {
            return Err(QuizError::ConfigError(format!(
                "default_question_count must be between 1 and {}",
                MAX_QUESTIONS_PER_CATEGORY
            )));
        }

        if self.max_teams == 0 || self.max_teams > MAX_TEAMS {
            return Err(QuizError::ConfigError(format!(
                "max_teams must be between 1 and {}",
                MAX_TEAMS
            )));
        }

        if self.notification_secs == 0 {
            return Err(QuizError::ConfigError(
                "notification_secs must be greater than 0".to_string(),
            ));
        }

        if self.tick_rate_ms < 10 || self.tick_rate_ms > 5_000 {
            return Err(QuizError::ConfigError(
                "tick_rate_ms must be between 10 and 5000".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the minimum category count
    pub fn with_min_categories(mut self, count: usize) -> Self {
        self.min_categories = count;
        self
    }

    /// Set the initial questions-per-category value
    pub fn with_default_question_count(mut self, count: usize) -> Self {
        self.default_question_count = count;
        self
    }

    /// Set the team cap
    pub fn with_max_teams(mut self, count: usize) -> Self {
        self.max_teams = count;
        self
    }

    /// Set the export directory
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            QuizError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/quizboard/quizboard.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QuizError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Get the default log file path
    /// Uses $DATA_HOME/quizboard/quizboard.log, falling back to the working directory
    pub fn log_file_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME).join(LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_teams, 6);
        assert_eq!(config.default_question_count, 5);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        assert!(GameConfig::new().with_max_teams(7).validate().is_err());
        assert!(GameConfig::new().with_max_teams(0).validate().is_err());
        assert!(GameConfig::new().with_default_question_count(11).validate().is_err());
        assert!(GameConfig::new().with_min_categories(0).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);
        let config = GameConfig::new()
            .with_min_categories(3)
            .with_export_dir(temp_dir.path().to_path_buf());

        config.save_to(&path).unwrap();
        let loaded = GameConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_teams = 4\n").unwrap();

        let loaded = GameConfig::load_from(&path).unwrap();
        assert_eq!(loaded.max_teams, 4);
        assert_eq!(loaded.min_categories, 1);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "max_teams = 99\n").unwrap();

        assert!(matches!(
            GameConfig::load_from(&path),
            Err(QuizError::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_file_path() {
        let path = GameConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("quizboard.toml"));
    }
}
