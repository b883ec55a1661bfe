//! Main application controller
//!
//! Owns every screen, routes key events to the active one and carries the
//! collected setup data forward. Game rules live in `game`; this module only
//! moves data between screens.

use crate::{
    app::{
        notification::{Notification, NotificationLevel, Notifier},
        screens::{
            BoardAction, BoardScreen, CategoryAction, CategorySetupScreen, EntryAction,
            LandingItem, LandingScreen, ManualEntryScreen, TeamAction, TeamSetupScreen,
            UploadAction, UploadScreen,
        },
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::GameConfig,
    io::{export_question_set, load_question_set},
    models::{CategoryRoster, QuestionSet},
    Result,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::path::Path;
use std::time::Instant;

/// TUI application controller
pub struct App {
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: GameConfig,
    notifier: Notifier,
    /// Screen components. The category screen keeps its state across visits;
    /// the later screens are rebuilt from the data handed to them.
    landing_screen: LandingScreen,
    upload_screen: UploadScreen,
    category_screen: CategorySetupScreen,
    entry_screen: Option<ManualEntryScreen>,
    team_screen: Option<TeamSetupScreen>,
    board_screen: Option<BoardScreen>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: GameConfig) -> Self {
        Self {
            state_manager: StateManager::new(),
            notifier: Notifier::new(config.notification_duration()),
            landing_screen: LandingScreen::new(),
            upload_screen: UploadScreen::new(),
            category_screen: CategorySetupScreen::new(
                config.min_categories,
                config.default_question_count,
            ),
            entry_screen: None,
            team_screen: None,
            board_screen: None,
            config,
        }
    }

    pub fn current_state(&self) -> AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    pub fn board_screen(&self) -> Option<&BoardScreen> {
        self.board_screen.as_ref()
    }

    pub fn team_screen(&self) -> Option<&TeamSetupScreen> {
        self.team_screen.as_ref()
    }

    /// Run the main application loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(self.config.tick_rate())?;
        tui.init()?;
        log::info!("TUI started");

        let result = self.event_loop(&mut tui).await;
        tui.restore()?;
        log::info!("TUI stopped");
        result
    }

    async fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        while !self.state_manager.should_quit() {
            tui.draw(|f| self.render(f))?;
            if let Some(key) = tui.next_key()? {
                self.handle_key(key).await;
            }
            self.notifier.tick(Instant::now());
        }
        Ok(())
    }

    /// Draw the current screen and any notification on top of it
    pub fn render(&mut self, f: &mut Frame) {
        match self.state_manager.current_state() {
            AppState::Landing => self.landing_screen.render(f),
            AppState::Upload => self.upload_screen.render(f),
            AppState::CategorySetup => self.category_screen.render(f),
            AppState::ManualEntry => {
                if let Some(screen) = &mut self.entry_screen {
                    screen.render(f);
                }
            }
            AppState::TeamSetup => {
                if let Some(screen) = &mut self.team_screen {
                    screen.render(f);
                }
            }
            AppState::Board => {
                if let Some(screen) = &mut self.board_screen {
                    screen.render(f);
                }
            }
        }
        self.notifier.render(f);
    }

    /// Handle one key press to completion
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if StateManager::is_hard_quit(key) {
            self.state_manager.quit();
            return;
        }
        // Esc closes a visible notification before it reaches the screen
        if key.code == KeyCode::Esc && self.notifier.dismiss() {
            return;
        }

        let state = self.state_manager.current_state();
        let nav_action = StateManager::key_to_navigation(key);
        if !state.accepts_text() && nav_action == NavigationAction::Quit {
            self.state_manager.quit();
            return;
        }

        let result = match state {
            AppState::Landing => {
                self.handle_landing_events(nav_action);
                Ok(())
            }
            AppState::Upload => self.handle_upload_events(key).await,
            AppState::CategorySetup => self.handle_category_events(key),
            AppState::ManualEntry => self.handle_entry_events(key),
            AppState::TeamSetup => self.handle_team_events(key),
            AppState::Board => {
                self.handle_board_events(key);
                Ok(())
            }
        };

        if let Err(err) = result {
            self.notifier.error(&err);
        }
    }

    /// Load a question file and move on to team setup. A failed load leaves
    /// the current screen untouched and shows why.
    pub async fn open_question_file(&mut self, path: &Path) {
        match load_question_set(path).await {
            Ok(loaded) => {
                self.notifier.success(
                    "Questions loaded",
                    format!(
                        "{} questions in {} categories",
                        loaded.questions.len(),
                        loaded.roster.len()
                    ),
                );
                self.start_team_setup(loaded.questions, loaded.roster);
            }
            Err(err) => self.notifier.error(&err),
        }
    }

    fn handle_landing_events(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Up => self.landing_screen.select_previous(),
            NavigationAction::Down => self.landing_screen.select_next(),
            NavigationAction::Select => match self.landing_screen.selected_item() {
                LandingItem::Upload => {
                    self.upload_screen = UploadScreen::new();
                    self.state_manager.transition_to(AppState::Upload);
                }
                LandingItem::ManualEntry => {
                    self.state_manager.transition_to(AppState::CategorySetup)
                }
                LandingItem::Quit => self.state_manager.quit(),
            },
            NavigationAction::Back => self.state_manager.go_back(),
            _ => {}
        }
    }

    async fn handle_upload_events(&mut self, key: KeyEvent) -> Result<()> {
        match self.upload_screen.handle_key_event(key)? {
            Some(UploadAction::Load(path)) => self.open_question_file(&path).await,
            Some(UploadAction::Back) => self.state_manager.go_back(),
            None => {}
        }
        Ok(())
    }

    fn handle_category_events(&mut self, key: KeyEvent) -> Result<()> {
        match self.category_screen.handle_key_event(key)? {
            Some(CategoryAction::StartEntry(roster)) => {
                log::info!("Manual entry started with {} categories", roster.len());
                self.entry_screen = Some(ManualEntryScreen::new(roster));
                self.state_manager.transition_to(AppState::ManualEntry);
            }
            Some(CategoryAction::Back) => self.state_manager.go_back(),
            None => {}
        }
        Ok(())
    }

    fn handle_entry_events(&mut self, key: KeyEvent) -> Result<()> {
        let Some(screen) = &mut self.entry_screen else {
            return Ok(());
        };
        match screen.handle_key_event(key)? {
            Some(EntryAction::Complete { questions, roster }) => {
                self.entry_screen = None;
                match export_question_set(&questions, &self.config.export_dir) {
                    Ok(path) => self
                        .notifier
                        .success("Questions saved", format!("Saved to {}", path.display())),
                    Err(err) => self.notifier.error(&err),
                }
                self.start_team_setup(questions, roster);
            }
            Some(EntryAction::Back) => {
                self.entry_screen = None;
                self.state_manager.go_back();
            }
            None => {}
        }
        Ok(())
    }

    fn handle_team_events(&mut self, key: KeyEvent) -> Result<()> {
        let Some(screen) = &mut self.team_screen else {
            return Ok(());
        };
        match screen.handle_key_event(key)? {
            Some(TeamAction::Start(session)) => {
                self.team_screen = None;
                self.board_screen = Some(BoardScreen::new(session));
                self.state_manager.transition_to(AppState::Board);
            }
            Some(TeamAction::Back) => {
                self.team_screen = None;
                self.state_manager.go_back();
            }
            None => {}
        }
        Ok(())
    }

    fn handle_board_events(&mut self, key: KeyEvent) {
        let Some(screen) = &mut self.board_screen else {
            return;
        };
        if let Some(BoardAction::Back) = screen.handle_key_event(key) {
            log::info!("Left the game board");
            if !screen.session().is_finished() {
                self.notifier.push(
                    NotificationLevel::Info,
                    "Game closed",
                    "The unfinished game and its scores were discarded",
                );
            }
            self.board_screen = None;
            self.state_manager.go_back();
        }
    }

    fn start_team_setup(&mut self, questions: QuestionSet, roster: CategoryRoster) {
        self.team_screen = Some(TeamSetupScreen::new(
            questions,
            roster,
            self.config.max_teams,
        ));
        self.state_manager.transition_to(AppState::TeamSetup);
    }
}
