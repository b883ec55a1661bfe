//! Board screen implementation
//!
//! Renders the question grid and scoreboard and turns key presses into
//! game session transitions. The screen owns the session; leaving the board
//! drops the game.

use super::common::{centered_rect, render_help, render_title, ACCENT, HIGHLIGHT, MUTED};
use crate::app::state::{AppState, NavigationAction, StateManager};
use crate::game::{CellId, CellState, GameSession, PlayState, TransitionError};
use crate::util::{format_points, format_score, truncate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Back,
}

pub struct BoardScreen {
    session: GameSession,
    cursor: CellId,
    steal_choice: usize,
}

impl BoardScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            cursor: CellId::new(0, 0),
            steal_choice: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn cursor(&self) -> CellId {
        self.cursor
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<BoardAction> {
        let action = StateManager::key_to_navigation(key);

        if self.session.is_finished() {
            return matches!(action, NavigationAction::Select | NavigationAction::Back)
                .then_some(BoardAction::Back);
        }

        let result = match self.session.state() {
            PlayState::Idle => match action {
                NavigationAction::Back => return Some(BoardAction::Back),
                NavigationAction::Select => self.session.open_cell(self.cursor),
                NavigationAction::Up
                | NavigationAction::Down
                | NavigationAction::Left
                | NavigationAction::Right => {
                    self.move_cursor(action);
                    Ok(())
                }
                _ => Ok(()),
            },
            PlayState::QuestionShown { .. } => match (key.code, action) {
                (_, NavigationAction::Back) => self.session.dismiss(),
                (_, NavigationAction::Select) => self.session.reveal_answer(),
                (KeyCode::Char('x' | 'X'), _) => self.session.close_without_scoring(),
                _ => Ok(()),
            },
            PlayState::AnswerShown { .. } if self.session.has_teams() => match key.code {
                KeyCode::Char('c' | 'C') => self.session.resolve_correct(),
                KeyCode::Char('w' | 'W') => {
                    let result = self.session.resolve_wrong();
                    self.steal_choice = 0;
                    result
                }
                _ => Ok(()),
            },
            PlayState::AnswerShown { .. } => match (key.code, action) {
                (KeyCode::Char('n' | 'N'), _) => self.session.resolve_no_one(),
                (_, NavigationAction::Select) => self.session.close_without_scoring(),
                _ => Ok(()),
            },
            PlayState::OpenToAll { .. } => self.handle_open_to_all(key, action),
        };

        if let Err(err) = result {
            log::debug!("Ignored board input: {}", err);
        }
        None
    }

    fn handle_open_to_all(
        &mut self,
        key: KeyEvent,
        action: NavigationAction,
    ) -> Result<(), TransitionError> {
        let candidates = self.session.steal_candidates();
        if candidates.is_empty() {
            return Ok(());
        }
        match (key.code, action) {
            (KeyCode::Char('n' | 'N'), _) => self.session.resolve_no_one(),
            (KeyCode::Char(d), _) if d.is_ascii_digit() && d != '0' => {
                let team = d as usize - '1' as usize;
                self.session.resolve_steal(team)
            }
            (_, NavigationAction::Left) | (_, NavigationAction::Up) => {
                self.steal_choice = (self.steal_choice + candidates.len() - 1) % candidates.len();
                Ok(())
            }
            (_, NavigationAction::Right) | (_, NavigationAction::Down) => {
                self.steal_choice = (self.steal_choice + 1) % candidates.len();
                Ok(())
            }
            (_, NavigationAction::Select) => {
                let team = candidates[self.steal_choice.min(candidates.len() - 1)];
                self.session.resolve_steal(team)
            }
            _ => Ok(()),
        }
    }

    fn move_cursor(&mut self, action: NavigationAction) {
        let board = self.session.board();
        let (cols, rows) = (board.columns(), board.rows());
        if cols == 0 || rows == 0 {
            return;
        }
        let CellId { category, row } = self.cursor;
        self.cursor = match action {
            NavigationAction::Left => CellId::new((category + cols - 1) % cols, row),
            NavigationAction::Right => CellId::new((category + 1) % cols, row),
            NavigationAction::Up => CellId::new(category, (row + rows - 1) % rows),
            NavigationAction::Down => CellId::new(category, (row + 1) % rows),
            _ => self.cursor,
        };
    }

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title / turn
                Constraint::Min(6),    // Board and scores
                Constraint::Length(3), // Help
            ])
            .split(size);

        let title = match self.session.current_team() {
            Some(team) => format!("{}  -  {}'s turn", AppState::Board.title(), team.name),
            None => AppState::Board.title().to_string(),
        };
        render_title(f, chunks[0], &title);

        let body = if self.session.has_teams() {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(30), Constraint::Length(28)])
                .split(chunks[1]);
            self.render_scores(f, split[1]);
            split[0]
        } else {
            chunks[1]
        };
        self.render_grid(f, body);
        self.render_keys(f, chunks[2]);

        if self.session.is_finished() {
            self.render_final(f, chunks[1]);
        } else if self.session.open_question().is_some() {
            self.render_question(f, chunks[1]);
        }
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let board = self.session.board();
        let cols = board.columns().max(1);
        let col_width = (area.width.saturating_sub(2) / cols as u16).max(6);
        let widths = vec![Constraint::Length(col_width); cols];

        let header = Row::new(
            board
                .category_names()
                .iter()
                .map(|name| {
                    TableCell::from(truncate(name, col_width.saturating_sub(1) as usize))
                        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
                })
                .collect::<Vec<_>>(),
        )
        .height(1)
        .bottom_margin(1);

        let rows: Vec<Row> = (0..board.rows())
            .map(|row| {
                let cells: Vec<TableCell> = (0..board.columns())
                    .map(|category| {
                        let id = CellId::new(category, row);
                        let points = board.cell(id).map(|c| c.points()).unwrap_or_default();
                        let (text, mut style) = match board.state(id) {
                            CellState::Available => (
                                format_points(points),
                                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                            ),
                            CellState::Revealed => ("  --".to_string(), Style::default().fg(MUTED)),
                            CellState::Unavailable => (String::new(), Style::default()),
                        };
                        if id == self.cursor {
                            style = style.bg(HIGHLIGHT).fg(Color::Black);
                        }
                        TableCell::from(text).style(style)
                    })
                    .collect();
                Row::new(cells).height(2)
            })
            .collect();

        let remaining = self.session.remaining_cells();
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} questions left", remaining)),
        );
        f.render_widget(table, area);
    }

    fn render_scores(&self, f: &mut Frame, area: Rect) {
        let turn = self.session.turn();
        let lines: Vec<Line> = self
            .session
            .teams()
            .iter()
            .enumerate()
            .map(|(i, team)| {
                let marker = if i == turn { "▶ " } else { "  " };
                let style = if i == turn {
                    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let score_style = if team.score < 0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(vec![
                    Span::styled(format!("{}{}. {}", marker, i + 1, truncate(&team.name, 14)), style),
                    Span::raw("  "),
                    Span::styled(format_score(team.score), score_style),
                ])
            })
            .collect();

        let scores = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Scores")
                .border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(scores, area);
    }

    fn render_question(&self, f: &mut Frame, area: Rect) {
        let Some(open) = self.session.open_question() else {
            return;
        };
        let popup = centered_rect(80, area.height.min(14), area);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} for {}", open.category, format_points(open.points)),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                open.question.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match open.answer {
            Some(answer) => lines.push(Line::from(vec![
                Span::styled("Answer: ", Style::default().fg(MUTED)),
                Span::styled(answer.to_string(), Style::default().fg(Color::Green)),
            ])),
            None => lines.push(Line::from(Span::styled(
                "Press Enter to reveal the answer",
                Style::default().fg(MUTED),
            ))),
        }

        if let PlayState::OpenToAll { original_team, .. } = self.session.state() {
            let original = self
                .session
                .teams()
                .get(original_team)
                .map(|t| t.name.as_str())
                .unwrap_or_default();
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "{} missed. Open to all, who got it?",
                original
            )));
            let candidates = self.session.steal_candidates();
            let mut spans = Vec::new();
            for (pos, &team) in candidates.iter().enumerate() {
                let name = &self.session.teams()[team].name;
                let style = if pos == self.steal_choice {
                    Style::default().bg(HIGHLIGHT).fg(Color::Black)
                } else {
                    Style::default().fg(HIGHLIGHT)
                };
                spans.push(Span::styled(format!(" {}. {} ", team + 1, name), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        let question = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ACCENT)),
            );
        f.render_widget(Clear, popup);
        f.render_widget(question, popup);
    }

    fn render_final(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(60, area.height.min(12), area);
        let mut lines = vec![
            Line::from(Span::styled(
                "Board cleared!",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let leaders = self.session.leaders();
        if !leaders.is_empty() {
            let names: Vec<&str> = leaders.iter().map(|t| t.name.as_str()).collect();
            let headline = if names.len() == 1 {
                format!("{} wins!", names[0])
            } else {
                format!("Tie: {}", names.join(", "))
            };
            lines.push(Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (place, team) in self.session.standings().iter().enumerate() {
                lines.push(Line::from(format!(
                    "{}. {}  {}",
                    place + 1,
                    team.name,
                    format_score(team.score)
                )));
            }
        }

        let summary = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(Clear, popup);
        f.render_widget(summary, popup);
    }

    fn render_keys(&self, f: &mut Frame, area: Rect) {
        let keys: &[(&str, &str)] = if self.session.is_finished() {
            &[("Enter", "Back to Start")]
        } else {
            match self.session.state() {
                PlayState::Idle => &[
                    ("←↑↓→", "Move"),
                    ("Enter", "Open"),
                    ("Esc", "Leave game"),
                    ("Q", "Quit"),
                ],
                PlayState::QuestionShown { .. } if self.session.has_teams() => {
                    &[("Enter", "Show answer"), ("Esc", "Close")]
                }
                PlayState::QuestionShown { .. } => &[
                    ("Enter", "Show answer"),
                    ("X", "Close without scoring"),
                    ("Esc", "Close"),
                ],
                PlayState::AnswerShown { .. } if self.session.has_teams() => {
                    &[("C", "Correct"), ("W", "Wrong")]
                }
                PlayState::AnswerShown { .. } => &[("Enter", "Close"), ("N", "No one got it")],
                PlayState::OpenToAll { .. } => &[
                    ("←→", "Choose team"),
                    ("Enter/1-6", "Got it"),
                    ("N", "No one got it"),
                ],
            }
        };
        render_help(f, area, keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryRoster, Question, QuestionSet, Team, TeamRoster};
    use crossterm::event::KeyModifiers;

    fn board(team_names: &[&str]) -> BoardScreen {
        let questions = QuestionSet::from(vec![
            Question::new("A", "a1", "x", 200),
            Question::new("A", "a2", "x", 400),
            Question::new("B", "b1", "x", 200),
            Question::new("B", "b2", "x", 400),
        ]);
        let roster = CategoryRoster::new(vec![Category::new("A", 2), Category::new("B", 2)]);
        let teams = TeamRoster::new(team_names.iter().map(|n| Team::new(*n)).collect());
        BoardScreen::new(GameSession::new(&questions, &roster, teams))
    }

    fn press(screen: &mut BoardScreen, code: KeyCode) -> Option<BoardAction> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cursor_wraps() {
        let mut screen = board(&[]);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.cursor(), CellId::new(1, 0));
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.cursor(), CellId::new(1, 1));
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.cursor(), CellId::new(1, 0));
    }

    #[test]
    fn test_correct_answer_by_keys() {
        let mut screen = board(&["X", "Y"]);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Enter);
        assert!(matches!(screen.session().state(), PlayState::QuestionShown { .. }));
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char('c'));

        assert_eq!(screen.session().teams()[0].score, 400);
        assert_eq!(screen.session().turn(), 1);
        assert_eq!(screen.session().cell_state(CellId::new(0, 1)), CellState::Revealed);
    }

    #[test]
    fn test_steal_by_selection() {
        let mut screen = board(&["X", "Y", "Z"]);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char('w'));
        assert!(matches!(screen.session().state(), PlayState::OpenToAll { .. }));

        // candidates are Y and Z; move to Z
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Enter);

        let scores: Vec<i64> = screen.session().teams().iter().map(|t| t.score).collect();
        assert_eq!(scores, vec![-100, 0, 200]);
        assert_eq!(screen.session().turn(), 1);
    }

    #[test]
    fn test_steal_by_digit_rejects_original_team() {
        let mut screen = board(&["X", "Y"]);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Char('w'));
        press(&mut screen, KeyCode::Char('1'));
        assert!(matches!(screen.session().state(), PlayState::OpenToAll { .. }));
        press(&mut screen, KeyCode::Char('2'));
        assert_eq!(screen.session().teams()[1].score, 200);
        assert_eq!(screen.session().state(), PlayState::Idle);
    }

    #[test]
    fn test_escape_closes_question_then_leaves() {
        let mut screen = board(&["X"]);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(press(&mut screen, KeyCode::Esc), None);
        assert_eq!(screen.session().state(), PlayState::Idle);
        assert_eq!(press(&mut screen, KeyCode::Esc), Some(BoardAction::Back));
    }

    #[test]
    fn test_no_teams_play_to_finish() {
        let mut screen = board(&[]);
        for _ in 0..2 {
            for _ in 0..2 {
                press(&mut screen, KeyCode::Enter);
                press(&mut screen, KeyCode::Char('x'));
                press(&mut screen, KeyCode::Down);
            }
            press(&mut screen, KeyCode::Right);
        }
        assert!(screen.session().is_finished());
        assert_eq!(press(&mut screen, KeyCode::Enter), Some(BoardAction::Back));
    }

    #[test]
    fn test_shifted_letters_resolve_too() {
        let shift = |code| KeyEvent::new(code, KeyModifiers::SHIFT);
        let mut screen = board(&["X", "Y"]);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        screen.handle_key_event(shift(KeyCode::Char('W')));
        assert!(matches!(screen.session().state(), PlayState::OpenToAll { .. }));
        screen.handle_key_event(shift(KeyCode::Char('N')));
        assert_eq!(screen.session().state(), PlayState::Idle);

        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Enter);
        press(&mut screen, KeyCode::Enter);
        screen.handle_key_event(shift(KeyCode::Char('C')));
        assert_eq!(screen.session().teams()[1].score, 200);

        let mut solo = board(&[]);
        press(&mut solo, KeyCode::Enter);
        solo.handle_key_event(shift(KeyCode::Char('X')));
        assert_eq!(solo.session().cell_state(CellId::new(0, 0)), CellState::Revealed);
    }
}
