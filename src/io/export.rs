//! Question set export
//!
//! Writes a finished manual-entry question set next to the game so it can be
//! loaded again later.

use crate::models::QuestionSet;
use crate::{QuizError, Result, EXPORT_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `jeopardy-questions.json` into `dir`, creating the directory if needed.
/// Returns the path written.
pub fn export_question_set(set: &QuestionSet, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        QuizError::ExportError(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(EXPORT_FILE);
    let content = serde_json::to_string_pretty(set)
        .map_err(|e| QuizError::ExportError(format!("Failed to serialize questions: {}", e)))?;

    fs::write(&path, content).map_err(|e| {
        QuizError::ExportError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    log::info!("Exported {} questions to {}", set.len(), path.display());
    Ok(path)
}
