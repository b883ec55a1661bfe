//! QUIZBOARD - terminal trivia board
//!
//! A TUI application for building a Jeopardy-style question board, either by
//! loading a JSON question set or by entering categories and questions by hand,
//! and then playing it with per-team scoring and turn rotation.

use std::fmt;

pub mod app;
pub mod config;
pub mod game;
pub mod io;
pub mod models;
pub mod setup;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// User input failed validation (empty names, duplicates, caps)
    ValidationError(String),
    /// Uploaded question set was malformed
    UploadError(String),
    /// Writing the question set export failed
    ExportError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::ValidationError(msg) => write!(f, "Invalid input: {}", msg),
            QuizError::UploadError(msg) => write!(f, "Upload error: {}", msg),
            QuizError::ExportError(msg) => write!(f, "Export error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::UploadError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for QUIZBOARD operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Short notification title for an error
    pub fn title(error: &QuizError) -> &'static str {
        match error {
            QuizError::ValidationError(_) => "Missing information",
            QuizError::UploadError(_) => "Could not load questions",
            QuizError::ExportError(_) => "Could not save questions",
            QuizError::ConfigError(_) => "Configuration problem",
            QuizError::IoError(_) => "File error",
            QuizError::TuiError(_) => "Display error",
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::ValidationError(msg) => msg.clone(),
            QuizError::UploadError(msg) => {
                format!("{}. Fix the file and try again.", msg)
            }
            QuizError::ExportError(msg) => {
                format!("{}. The game continues without a saved copy.", msg)
            }
            QuizError::IoError(err) => match err.kind() {
                std::io::ErrorKind::NotFound => "File not found. Check the path.".to_string(),
                std::io::ErrorKind::PermissionDenied => {
                    "Permission denied. Check file permissions.".to_string()
                }
                _ => error.to_string(),
            },
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::TuiError(_) => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "quizboard";
pub const CONFIG_FILE: &str = "quizboard.toml";
pub const LOG_FILE: &str = "quizboard.log";
pub const EXPORT_FILE: &str = "jeopardy-questions.json";
/// Point step between board rows; row `n` (0-based) is worth `(n + 1) * POINT_STEP`
pub const POINT_STEP: i64 = 200;
pub const MIN_QUESTIONS_PER_CATEGORY: usize = 1;
pub const MAX_QUESTIONS_PER_CATEGORY: usize = 10;
pub const MAX_TEAMS: usize = 6;
