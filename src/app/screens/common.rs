//! Layout pieces shared by the screens

use crate::util::TextInput;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const ACCENT: Color = Color::Magenta;
pub const HIGHLIGHT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

/// Split a screen into title, body and help rows
pub fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Help text
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
    f.render_widget(title, area);
}

/// Render `(key, description)` pairs as a help bar
pub fn render_help(f: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, description) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}  ", description)));
    }

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(help, area);
}

/// Render a labelled text field; focused fields show the cursor
pub fn render_input(f: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool, placeholder: &str) {
    let border = if focused {
        Style::default().fg(HIGHLIGHT)
    } else {
        Style::default().fg(MUTED)
    };

    let line = if input.value().is_empty() && !focused {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(MUTED)))
    } else if focused {
        let chars: Vec<char> = input.value().chars().collect();
        let cursor = input.cursor().min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
        let after: String = chars.get(cursor + 1..).map(|s| s.iter().collect()).unwrap_or_default();
        Line::from(vec![
            Span::raw(before),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ])
    } else {
        Line::from(input.value().to_string())
    };

    let field = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(border),
    );
    f.render_widget(field, area);
}

/// Render a button-like line; disabled buttons are dimmed
pub fn render_button(f: &mut Frame, area: Rect, label: &str, focused: bool, enabled: bool) {
    let style = match (focused, enabled) {
        (_, false) => Style::default().fg(MUTED),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(HIGHLIGHT),
    };
    let button = Paragraph::new(label.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
