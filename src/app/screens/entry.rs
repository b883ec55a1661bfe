//! Manual entry screen implementation
//!
//! Steps through every category collecting question/answer pairs in point
//! order, then hands the finished question set back to the app.

use super::common::{frame_layout, render_button, render_help, render_input, render_title, ACCENT};
use crate::app::state::AppState;
use crate::models::{CategoryRoster, QuestionSet};
use crate::setup::{EntryProgress, EntrySequencer};
use crate::util::{format_points, InputOutcome, TextInput};
use crate::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Question,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    Back,
    Complete {
        questions: QuestionSet,
        roster: CategoryRoster,
    },
}

pub struct ManualEntryScreen {
    sequencer: EntrySequencer,
    question: TextInput,
    answer: TextInput,
    field: Field,
}

impl ManualEntryScreen {
    pub fn new(roster: CategoryRoster) -> Self {
        Self {
            sequencer: EntrySequencer::new(roster),
            question: TextInput::new(),
            answer: TextInput::new(),
            field: Field::Question,
        }
    }

    pub fn sequencer(&self) -> &EntrySequencer {
        &self.sequencer
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<EntryAction>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(EntryAction::Back)),
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_field();
                return Ok(None);
            }
            _ => {}
        }

        let outcome = match self.field {
            Field::Question => self.question.handle_key(key),
            Field::Answer => self.answer.handle_key(key),
        };
        if outcome != InputOutcome::Submitted {
            return Ok(None);
        }
        if self.field == Field::Question && self.answer.is_blank() {
            self.field = Field::Answer;
            return Ok(None);
        }

        let progress = self
            .sequencer
            .submit(self.question.value(), self.answer.value())?;
        self.question.clear();
        self.answer.clear();
        self.field = Field::Question;

        Ok(match progress {
            EntryProgress::NextQuestion | EntryProgress::NextCategory => None,
            EntryProgress::Complete(questions) => Some(EntryAction::Complete {
                questions,
                roster: self.sequencer.roster().clone(),
            }),
        })
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            Field::Question => Field::Answer,
            Field::Answer => Field::Question,
        };
    }

    fn button_label(&self) -> &'static str {
        if self.sequencer.is_last_overall() {
            "Finish All Categories"
        } else if self.sequencer.is_last_for_category() {
            "Complete Category"
        } else {
            "Add Question"
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let (title, body, help) = frame_layout(f.size());
        render_title(f, title, AppState::ManualEntry.title());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress
                Constraint::Length(4), // Category header
                Constraint::Length(5), // Question
                Constraint::Length(5), // Answer
                Constraint::Length(3), // Submit
                Constraint::Min(0),
            ])
            .split(body);

        let roster_len = self.sequencer.roster().len();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Category {} of {}",
                (self.sequencer.category_index() + 1).min(roster_len),
                roster_len
            )))
            .gauge_style(Style::default().fg(ACCENT))
            .ratio(self.sequencer.progress().clamp(0.0, 1.0));
        f.render_widget(gauge, chunks[0]);

        if let Some(category) = self.sequencer.current_category() {
            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    category.name.clone(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::raw(format!(
                        "Question {} of {}   ",
                        self.sequencer.current_position(),
                        category.question_count
                    )),
                    Span::styled(
                        format_points(self.sequencer.current_points()),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, chunks[1]);
        }

        render_input(
            f,
            chunks[2],
            "Question",
            &self.question,
            self.field == Field::Question,
            "Enter your question",
        );
        render_input(
            f,
            chunks[3],
            "Answer",
            &self.answer,
            self.field == Field::Answer,
            "Enter the answer",
        );
        render_button(
            f,
            chunks[4],
            self.button_label(),
            false,
            !self.question.is_blank() && !self.answer.is_blank(),
        );

        render_help(
            f,
            help,
            &[
                ("Tab", "Switch field"),
                ("Enter", "Next / Submit"),
                ("Esc", "Back to Categories"),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Question};
    use crate::QuizError;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut ManualEntryScreen, code: KeyCode) -> Result<Option<EntryAction>> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(screen: &mut ManualEntryScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c)).unwrap();
        }
    }

    fn enter_pair(screen: &mut ManualEntryScreen, q: &str, a: &str) -> Result<Option<EntryAction>> {
        type_text(screen, q);
        press(screen, KeyCode::Enter)?;
        type_text(screen, a);
        press(screen, KeyCode::Enter)
    }

    #[test]
    fn test_full_entry_flow() {
        let roster = CategoryRoster::new(vec![Category::new("A", 1), Category::new("B", 2)]);
        let mut screen = ManualEntryScreen::new(roster.clone());
        assert_eq!(screen.button_label(), "Complete Category");

        assert_eq!(enter_pair(&mut screen, "q1", "a1").unwrap(), None);
        assert_eq!(enter_pair(&mut screen, "q2", "a2").unwrap(), None);
        assert_eq!(screen.button_label(), "Finish All Categories");

        match enter_pair(&mut screen, "q3", "a3").unwrap() {
            Some(EntryAction::Complete { questions, roster: r }) => {
                assert_eq!(r, roster);
                assert_eq!(questions.questions()[2], Question::new("B", "q3", "a3", 400));
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_answer_keeps_question() {
        let roster = CategoryRoster::new(vec![Category::new("A", 1)]);
        let mut screen = ManualEntryScreen::new(roster);
        type_text(&mut screen, "q1");
        press(&mut screen, KeyCode::Enter).unwrap();
        // answer field is empty; submitting from it fails
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Err(QuizError::ValidationError(_))
        ));
        assert_eq!(screen.question.value(), "q1");
        assert_eq!(screen.sequencer().current_position(), 1);
    }
}
