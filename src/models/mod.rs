//! Data models module
//!
//! Contains the question set, category roster and team roster that are
//! collected during setup and frozen when a game starts.

pub mod question;
pub mod team;

// Re-export commonly used types
pub use question::{Category, CategoryRoster, Question, QuestionSet};
pub use team::{Team, TeamRoster};
