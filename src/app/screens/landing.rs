//! Landing screen implementation
//!
//! Main menu: load a question file, enter questions by hand, or quit.

use super::common::{frame_layout, render_help, render_title, ACCENT, HIGHLIGHT};
use crate::app::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Landing menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingItem {
    Upload,
    ManualEntry,
    Quit,
}

impl LandingItem {
    pub fn all() -> [Self; 3] {
        [Self::Upload, Self::ManualEntry, Self::Quit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Load Questions  - import a JSON question file",
            Self::ManualEntry => "Manual Entry    - create your questions by hand",
            Self::Quit => "Quit",
        }
    }
}

#[derive(Debug)]
pub struct LandingScreen {
    selected_index: usize,
    list_state: ListState,
}

impl LandingScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    pub fn selected_item(&self) -> LandingItem {
        LandingItem::all()[self.selected_index]
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        let len = LandingItem::all().len();
        self.selected_index = (self.selected_index + len - 1) % len;
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % LandingItem::all().len();
        self.list_state.select(Some(self.selected_index));
    }

    pub fn render(&mut self, f: &mut Frame) {
        let (title, body, help) = frame_layout(f.size());
        render_title(f, title, AppState::Landing.title());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // Banner
                Constraint::Min(5),    // Menu
            ])
            .split(body);

        self.render_banner(f, chunks[0]);
        self.render_menu(f, chunks[1]);
        render_help(
            f,
            help,
            &[("↑↓", "Navigate"), ("Enter", "Select"), ("Q", "Quit")],
        );
    }

    fn render_banner(&self, f: &mut Frame, area: Rect) {
        let banner = Paragraph::new(vec![
            Line::from(""),
            Line::from("QUIZBOARD"),
            Line::from("Load a question file or build the board by hand"),
        ])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(banner, area);
    }

    fn render_menu(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = LandingItem::all()
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Start"))
            .highlight_style(Style::default().bg(HIGHLIGHT).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for LandingScreen {
    fn default() -> Self {
        Self::new()
    }
}
