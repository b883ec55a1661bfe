//! Team setup screen implementation
//!
//! Optional roster of up to six teams. Starting with no teams plays the
//! board without scoring.

use super::common::{
    frame_layout, render_button, render_help, render_input, render_title, HIGHLIGHT, MUTED,
};
use crate::app::state::AppState;
use crate::game::GameSession;
use crate::models::{CategoryRoster, QuestionSet};
use crate::setup::TeamRosterBuilder;
use crate::util::{InputOutcome, TextInput};
use crate::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Longest team name accepted by the input
const TEAM_NAME_MAX: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    List,
    Start,
}

#[derive(Debug)]
pub enum TeamAction {
    Back,
    Start(GameSession),
}

pub struct TeamSetupScreen {
    questions: QuestionSet,
    roster: CategoryRoster,
    builder: TeamRosterBuilder,
    name: TextInput,
    focus: Focus,
    list_state: ListState,
}

impl TeamSetupScreen {
    pub fn new(questions: QuestionSet, roster: CategoryRoster, max_teams: usize) -> Self {
        Self {
            questions,
            roster,
            builder: TeamRosterBuilder::new(max_teams),
            name: TextInput::with_max_len(TEAM_NAME_MAX),
            focus: Focus::Name,
            list_state: ListState::default(),
        }
    }

    pub fn builder(&self) -> &TeamRosterBuilder {
        &self.builder
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<TeamAction>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(TeamAction::Back)),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Name => Focus::List,
                    Focus::List => Focus::Start,
                    Focus::Start => Focus::Name,
                };
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Name => Focus::Start,
                    Focus::List => Focus::Name,
                    Focus::Start => Focus::List,
                };
                return Ok(None);
            }
            _ => {}
        }

        match self.focus {
            Focus::Name => {
                if self.name.handle_key(key) == InputOutcome::Submitted {
                    self.builder.add(self.name.value())?;
                    self.name.clear();
                }
            }
            Focus::List => {
                let len = self.builder.len();
                match key.code {
                    KeyCode::Up if len > 0 => {
                        let i = self.list_state.selected().unwrap_or(0);
                        self.list_state.select(Some((i + len - 1) % len));
                    }
                    KeyCode::Down if len > 0 => {
                        let i = self.list_state.selected().map(|i| i + 1).unwrap_or(0);
                        self.list_state.select(Some(i % len));
                    }
                    KeyCode::Delete | KeyCode::Backspace => {
                        if let Some(index) = self.list_state.selected() {
                            self.builder.remove(index);
                            let len = self.builder.len();
                            self.list_state
                                .select((len > 0).then(|| index.min(len - 1)));
                        }
                    }
                    _ => {}
                }
            }
            Focus::Start => {
                if key.code == KeyCode::Enter {
                    let session =
                        GameSession::new(&self.questions, &self.roster, self.builder.finish());
                    return Ok(Some(TeamAction::Start(session)));
                }
            }
        }
        Ok(None)
    }

    pub fn render(&mut self, f: &mut Frame) {
        let (title, body, help) = frame_layout(f.size());
        render_title(f, title, AppState::TeamSetup.title());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name input
                Constraint::Length(1), // Cap hint
                Constraint::Min(4),    // Team list
                Constraint::Length(3), // Start
            ])
            .split(body);

        render_input(
            f,
            chunks[0],
            "Team Name",
            &self.name,
            self.focus == Focus::Name,
            "Enter team name",
        );

        let hint = if self.builder.is_full() {
            format!("Team limit reached ({} teams)", self.builder.max_teams())
        } else {
            format!(
                "Add 0-{} teams. Without teams the board is played without scores.",
                self.builder.max_teams()
            )
        };
        f.render_widget(Paragraph::new(hint).style(Style::default().fg(MUTED)), chunks[1]);

        let items: Vec<ListItem> = self
            .builder
            .teams()
            .iter()
            .map(|t| ListItem::new(format!("{}   starting score: 0", t.name)))
            .collect();
        let border = if self.focus == Focus::List {
            Style::default().fg(HIGHLIGHT)
        } else {
            Style::default().fg(MUTED)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        "Teams ({}/{})",
                        self.builder.len(),
                        self.builder.max_teams()
                    ))
                    .border_style(border),
            )
            .highlight_style(Style::default().bg(HIGHLIGHT).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[2], &mut self.list_state);

        let label = if self.builder.is_empty() {
            "Start Without Teams"
        } else {
            "Start Game"
        };
        render_button(f, chunks[3], label, self.focus == Focus::Start, true);

        render_help(
            f,
            help,
            &[
                ("Tab", "Next field"),
                ("Enter", "Add / Start"),
                ("Del", "Remove"),
                ("Esc", "Back"),
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

    fn screen() -> TeamSetupScreen {
        let questions = QuestionSet::from(vec![Question::new("A", "q", "a", 200)]);
        let roster = CategoryRoster::new(vec![Category::new("A", 1)]);
        TeamSetupScreen::new(questions, roster, 6)
    }

    fn press(screen: &mut TeamSetupScreen, code: KeyCode) -> Result<Option<TeamAction>> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn add_team(screen: &mut TeamSetupScreen, name: &str) -> Result<Option<TeamAction>> {
        for c in name.chars() {
            press(screen, KeyCode::Char(c)).unwrap();
        }
        press(screen, KeyCode::Enter)
    }

    #[test]
    fn test_start_with_teams() {
        let mut screen = screen();
        add_team(&mut screen, "Red").unwrap();
        add_team(&mut screen, "Blue").unwrap();
        press(&mut screen, KeyCode::BackTab).unwrap();

        match press(&mut screen, KeyCode::Enter).unwrap() {
            Some(TeamAction::Start(session)) => {
                let names: Vec<_> = session.teams().iter().map(|t| t.name.as_str()).collect();
                assert_eq!(names, vec!["Red", "Blue"]);
                assert_eq!(session.current_team().unwrap().name, "Red");
            }
            other => panic!("expected start, got {:?}", other),
        }
    }

    #[test]
    fn test_start_without_teams() {
        let mut screen = screen();
        press(&mut screen, KeyCode::BackTab).unwrap();
        match press(&mut screen, KeyCode::Enter).unwrap() {
            Some(TeamAction::Start(session)) => assert!(!session.has_teams()),
            other => panic!("expected start, got {:?}", other),
        }
    }

    #[test]
    fn test_cap_and_blank_names() {
        let mut screen = screen();
        assert!(matches!(
            add_team(&mut screen, "   "),
            Err(QuizError::ValidationError(_))
        ));
        for name in ["A", "B", "C", "D", "E", "F"] {
            add_team(&mut screen, name).unwrap();
        }
        assert!(add_team(&mut screen, "G").is_err());
        assert_eq!(screen.builder().len(), 6);
    }

    #[test]
    fn test_remove_team() {
        let mut screen = screen();
        add_team(&mut screen, "Red").unwrap();
        add_team(&mut screen, "Blue").unwrap();
        press(&mut screen, KeyCode::Tab).unwrap();
        press(&mut screen, KeyCode::Down).unwrap();
        press(&mut screen, KeyCode::Delete).unwrap();
        assert_eq!(screen.builder().teams()[0].name, "Blue");
    }
}
