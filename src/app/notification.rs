//! Transient notifications
//!
//! A single toast shown at the bottom of the screen. It expires on its own
//! and can be dismissed early. Validation failures never leave the screen
//! they happened on; they only produce one of these.

use crate::{error, QuizError};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl NotificationLevel {
    fn color(&self) -> Color {
        match self {
            NotificationLevel::Info => Color::Cyan,
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
    expires_at: Instant,
}

/// Holds the toast currently on screen
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notification>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn push(&mut self, level: NotificationLevel, title: &str, message: impl Into<String>) {
        self.current = Some(Notification {
            level,
            title: title.to_string(),
            message: message.into(),
            expires_at: Instant::now() + self.duration,
        });
    }

    pub fn success(&mut self, title: &str, message: impl Into<String>) {
        self.push(NotificationLevel::Success, title, message);
    }

    /// Show an error with its user-facing wording
    pub fn error(&mut self, err: &QuizError) {
        log::warn!("{}", err);
        self.push(
            NotificationLevel::Error,
            error::title(err),
            error::user_friendly_message(err),
        );
    }

    /// Drop the toast early; returns whether one was showing
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Expire the toast once its time is up
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let Some(notification) = &self.current else {
            return;
        };
        let size = f.size();
        let width = size.width.min(60);
        let height = size.height.min(5);
        let area = Rect {
            x: size.x + (size.width - width) / 2,
            y: size.y + size.height - height,
            width,
            height,
        };

        let color = notification.level.color();
        let text = vec![
            Line::from(Span::styled(
                notification.title.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(notification.message.clone()),
        ];
        let toast = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );

        f.render_widget(Clear, area);
        f.render_widget(toast, area);
    }
}
