//! Utility functions module
//!
//! Contains text input editing and display formatting helpers.

pub mod format;
pub mod input;

// Re-export commonly used items
pub use format::{format_points, format_score, truncate};
pub use input::{InputOutcome, TextInput};
