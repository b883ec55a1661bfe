//! Application state management
//!
//! Handles screen transitions, back-navigation and keyboard event mapping
//! for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Choose between loading a question file and manual entry
    #[default]
    Landing,
    /// Path prompt for a question set file
    Upload,
    /// Category names and questions-per-category
    CategorySetup,
    /// Question/answer entry, one category at a time
    ManualEntry,
    /// Optional team roster
    TeamSetup,
    /// Game in progress
    Board,
}

impl AppState {
    /// Screen reached by going back; `None` means quit
    pub fn parent(&self) -> Option<AppState> {
        match self {
            AppState::Landing => None,
            AppState::ManualEntry => Some(AppState::CategorySetup),
            AppState::Upload | AppState::CategorySetup | AppState::TeamSetup | AppState::Board => {
                Some(AppState::Landing)
            }
        }
    }

    /// Screens with text fields get raw key events; single-letter shortcuts
    /// such as `q` must not fire there.
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            AppState::Upload | AppState::CategorySetup | AppState::ManualEntry | AppState::TeamSetup
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppState::Landing => "Create Your Game",
            AppState::Upload => "Load Questions",
            AppState::CategorySetup => "Set Up Categories",
            AppState::ManualEntry => "Manual Entry",
            AppState::TeamSetup => "Set Up Teams",
            AppState::Board => "Game Board",
        }
    }
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc, Backspace)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the landing screen
    pub fn new() -> Self {
        Self {
            current_state: AppState::Landing,
            previous_state: None,
            should_quit: false,
        }
    }

    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            log::debug!("Screen {:?} -> {:?}", self.current_state, new_state);
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Go to the parent screen, or quit from the landing screen
    pub fn go_back(&mut self) {
        match self.current_state.parent() {
            Some(parent) => self.transition_to(parent),
            None => self.quit(),
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,

            // Tab navigation
            KeyCode::Tab => NavigationAction::Next,
            KeyCode::BackTab => NavigationAction::Previous,

            _ => NavigationAction::None,
        }
    }

    /// True for the keys that quit from any screen
    pub fn is_hard_quit(key: KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
