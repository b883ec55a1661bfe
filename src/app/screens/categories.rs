//! Category setup screen implementation
//!
//! Collects category names and the questions-per-category value. The
//! continue button stays disabled until the configured minimum is met.

use super::common::{
    frame_layout, render_button, render_help, render_input, render_title, HIGHLIGHT, MUTED,
};
use crate::app::state::AppState;
use crate::models::CategoryRoster;
use crate::setup::CategoryRosterBuilder;
use crate::util::{InputOutcome, TextInput};
use crate::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Count,
    List,
    Continue,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Count,
            Focus::Count => Focus::List,
            Focus::List => Focus::Continue,
            Focus::Continue => Focus::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Name => Focus::Continue,
            Focus::Count => Focus::Name,
            Focus::List => Focus::Count,
            Focus::Continue => Focus::List,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryAction {
    Back,
    StartEntry(CategoryRoster),
}

pub struct CategorySetupScreen {
    builder: CategoryRosterBuilder,
    name: TextInput,
    focus: Focus,
    list_state: ListState,
}

impl CategorySetupScreen {
    pub fn new(min_categories: usize, question_count: usize) -> Self {
        Self {
            builder: CategoryRosterBuilder::new(min_categories, question_count),
            name: TextInput::new(),
            focus: Focus::Name,
            list_state: ListState::default(),
        }
    }

    pub fn builder(&self) -> &CategoryRosterBuilder {
        &self.builder
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<CategoryAction>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(CategoryAction::Back)),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
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
            Focus::Count => match key.code {
                KeyCode::Up | KeyCode::Right | KeyCode::Char('+') => {
                    self.builder.increment_question_count()
                }
                KeyCode::Down | KeyCode::Left | KeyCode::Char('-') => {
                    self.builder.decrement_question_count()
                }
                _ => {}
            },
            Focus::List => match key.code {
                KeyCode::Up => self.move_selection(-1),
                KeyCode::Down => self.move_selection(1),
                KeyCode::Delete | KeyCode::Backspace => {
                    if let Some(index) = self.list_state.selected() {
                        self.builder.remove(index);
                        self.clamp_selection();
                    }
                }
                _ => {}
            },
            Focus::Continue => {
                if key.code == KeyCode::Enter && self.builder.can_advance() {
                    return Ok(Some(CategoryAction::StartEntry(self.builder.finish()?)));
                }
            }
        }
        Ok(None)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.builder.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.builder.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let (title, body, help) = frame_layout(f.size());
        render_title(f, title, AppState::CategorySetup.title());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Inputs
                Constraint::Min(4),    // Category list
                Constraint::Length(3), // Continue
            ])
            .split(body);

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[0]);

        render_input(
            f,
            inputs[0],
            "Category Name",
            &self.name,
            self.focus == Focus::Name,
            "Enter category name",
        );
        self.render_count(f, inputs[1]);
        self.render_list(f, chunks[1]);

        let label = if self.builder.can_advance() {
            "Start Adding Questions".to_string()
        } else {
            format!("Add {} more categories", self.builder.missing())
        };
        render_button(
            f,
            chunks[2],
            &label,
            self.focus == Focus::Continue,
            self.builder.can_advance(),
        );

        render_help(
            f,
            help,
            &[
                ("Tab", "Next field"),
                ("Enter", "Add / Continue"),
                ("↑↓", "Count / Select"),
                ("Del", "Remove"),
                ("Esc", "Back"),
            ],
        );
    }

    fn render_count(&self, f: &mut Frame, area: Rect) {
        let border = if self.focus == Focus::Count {
            Style::default().fg(HIGHLIGHT)
        } else {
            Style::default().fg(MUTED)
        };
        let count = Paragraph::new(format!("◀ {} ▶", self.builder.question_count())).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Questions per Category")
                .border_style(border),
        );
        f.render_widget(count, area);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .builder
            .categories()
            .iter()
            .map(|c| ListItem::new(format!("{}  ({} questions)", c.name, c.question_count)))
            .collect();

        let border = if self.focus == Focus::List {
            Style::default().fg(HIGHLIGHT)
        } else {
            Style::default().fg(MUTED)
        };
        let title = format!(
            "Added Categories ({}/{})",
            self.builder.len(),
            self.builder.min_categories()
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .highlight_style(Style::default().bg(HIGHLIGHT).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
