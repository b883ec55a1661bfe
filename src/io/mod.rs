//! File I/O module
//!
//! Loading uploaded question sets and exporting manually entered ones.

pub mod export;
pub mod upload;

pub use export::export_question_set;
pub use upload::{load_question_set, parse_question_set, LoadedQuestions};
