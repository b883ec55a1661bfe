//! Terminal management system
//!
//! Handles crossterm backend initialization, screen management,
//! and keyboard event polling for the TUI application. Terminal failures
//! surface as `QuizError::TuiError` naming the step that failed.

use crate::{QuizError, Result};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

fn terminal_error(step: &'static str) -> impl Fn(io::Error) -> QuizError {
    move |err| QuizError::TuiError(format!("{} failed: {}", step, err))
}

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    active: bool,
}

impl Tui {
    /// Create a new TUI instance with crossterm backend
    pub fn new(tick_rate: Duration) -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).map_err(terminal_error("terminal setup"))?;

        Ok(Self {
            terminal,
            tick_rate,
            active: false,
        })
    }

    /// Switch to raw mode and the alternate screen
    pub fn init(&mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error("raw mode"))?;
        execute!(io::stdout(), EnterAlternateScreen).map_err(terminal_error("alternate screen"))?;
        self.active = true;
        self.terminal
            .hide_cursor()
            .map_err(terminal_error("cursor hide"))?;
        self.terminal.clear().map_err(terminal_error("clear"))?;
        Ok(())
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode().map_err(terminal_error("raw mode reset"))?;
        execute!(io::stdout(), LeaveAlternateScreen)
            .map_err(terminal_error("leaving alternate screen"))?;
        self.terminal
            .show_cursor()
            .map_err(terminal_error("cursor show"))?;
        Ok(())
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).map_err(terminal_error("draw"))?;
        Ok(())
    }

    /// Wait up to one tick for a key press
    pub fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        if event::poll(self.tick_rate).map_err(terminal_error("input poll"))? {
            if let Event::Key(key) = event::read().map_err(terminal_error("input read"))? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;

    #[test]
    fn test_terminal_errors_name_the_step() {
        let err = terminal_error("draw")(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        match &err {
            QuizError::TuiError(msg) => {
                assert!(msg.starts_with("draw failed"));
                assert!(msg.contains("closed"));
            }
            other => panic!("expected TUI error, got {:?}", other),
        }
        assert_eq!(error::title(&err), "Display error");
    }
}
