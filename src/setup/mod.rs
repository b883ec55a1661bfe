//! Setup-phase builders
//!
//! Roster builders for the category and team setup screens, and the manual
//! question entry sequencer.

pub mod entry;
pub mod roster;

pub use entry::{EntryProgress, EntrySequencer};
pub use roster::{CategoryRosterBuilder, TeamRosterBuilder};
