//! Upload screen implementation
//!
//! Prompts for the path of a JSON question file. Loading happens in the app
//! controller; a failed load keeps the typed path for correction.

use super::common::{centered_rect, frame_layout, render_help, render_input, render_title, MUTED};
use crate::app::state::AppState;
use crate::util::{InputOutcome, TextInput};
use crate::{QuizError, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadAction {
    Back,
    Load(PathBuf),
}

#[derive(Debug, Default)]
pub struct UploadScreen {
    path: TextInput,
}

impl UploadScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &str {
        self.path.value()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<UploadAction>> {
        if key.code == KeyCode::Esc {
            return Ok(Some(UploadAction::Back));
        }
        match self.path.handle_key(key) {
            InputOutcome::Submitted => {
                if self.path.is_blank() {
                    return Err(QuizError::ValidationError(
                        "Enter the path of a question file".to_string(),
                    ));
                }
                Ok(Some(UploadAction::Load(PathBuf::from(self.path.value().trim()))))
            }
            InputOutcome::Edited | InputOutcome::Ignored => Ok(None),
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let (title, body, help) = frame_layout(f.size());
        render_title(f, title, AppState::Upload.title());

        let area = centered_rect(70, 7, body);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(4)])
            .split(area);

        render_input(f, chunks[0], "Question file", &self.path, true, "questions.json");
        let hint = Paragraph::new(vec![
            Line::from("A JSON array of {category, question, answer, points} records."),
            Line::from("Categories and their question counts are taken from the file."),
        ])
        .style(Style::default().fg(MUTED));
        f.render_widget(hint, chunks[1]);

        render_help(f, help, &[("Enter", "Load"), ("Esc", "Back")]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut UploadScreen, code: KeyCode) -> Result<Option<UploadAction>> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_blank_path_is_rejected() {
        let mut screen = UploadScreen::new();
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Err(QuizError::ValidationError(_))
        ));
    }

    #[test]
    fn test_typed_path_is_submitted() {
        let mut screen = UploadScreen::new();
        for c in "q.json".chars() {
            press(&mut screen, KeyCode::Char(c)).unwrap();
        }
        assert_eq!(
            press(&mut screen, KeyCode::Enter).unwrap(),
            Some(UploadAction::Load(PathBuf::from("q.json")))
        );
        assert_eq!(press(&mut screen, KeyCode::Esc).unwrap(), Some(UploadAction::Back));
    }
}
