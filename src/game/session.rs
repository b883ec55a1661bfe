//! Game session state machine
//!
//! Owns the board, the team roster and the turn pointer for one game, and
//! mediates question disclosure and scoring. Every transition either applies
//! completely or returns a [`TransitionError`] and leaves the session untouched.

use crate::game::board::{Board, CellId, CellState};
use crate::models::{CategoryRoster, QuestionSet, Team, TeamRoster};
use std::fmt;

/// Disclosure/resolution state of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// No question open
    Idle,
    /// Question displayed, answer hidden
    QuestionShown { cell: CellId },
    /// Answer displayed, awaiting a scoring decision
    AnswerShown { cell: CellId },
    /// The acting team missed; any other team may claim the points
    OpenToAll { cell: CellId, original_team: usize },
}

impl PlayState {
    pub fn name(&self) -> &'static str {
        match self {
            PlayState::Idle => "idle",
            PlayState::QuestionShown { .. } => "question-shown",
            PlayState::AnswerShown { .. } => "answer-shown",
            PlayState::OpenToAll { .. } => "open-to-all",
        }
    }

    /// Cell currently in play, if any
    pub fn cell(&self) -> Option<CellId> {
        match *self {
            PlayState::Idle => None,
            PlayState::QuestionShown { cell }
            | PlayState::AnswerShown { cell }
            | PlayState::OpenToAll { cell, .. } => Some(cell),
        }
    }
}

/// A rejected transition. The session is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Position is outside the board
    CellOutOfRange(CellId),
    /// No question is bound to the cell
    CellUnavailable(CellId),
    /// Cell was already played
    CellRevealed(CellId),
    /// Operation not allowed in the current play state
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    /// Operation needs at least one team
    TeamsRequired(&'static str),
    /// Operation only exists for games without teams
    TeamsPresent(&'static str),
    /// Steal attempted by the original team or a team that does not exist
    InvalidStealTeam(usize),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::CellOutOfRange(cell) => write!(f, "cell {} is off the board", cell),
            TransitionError::CellUnavailable(cell) => write!(f, "cell {} has no question", cell),
            TransitionError::CellRevealed(cell) => write!(f, "cell {} was already played", cell),
            TransitionError::InvalidState { operation, state } => {
                write!(f, "{} is not allowed while {}", operation, state)
            }
            TransitionError::TeamsRequired(op) => write!(f, "{} requires teams", op),
            TransitionError::TeamsPresent(op) => write!(f, "{} is only for games without teams", op),
            TransitionError::InvalidStealTeam(team) => {
                write!(f, "team {} cannot claim this question", team)
            }
        }
    }
}

impl std::error::Error for TransitionError {}

type Transition<T = ()> = std::result::Result<T, TransitionError>;

/// View of the question currently in play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenQuestion<'a> {
    pub cell: CellId,
    pub category: &'a str,
    pub points: i64,
    pub question: &'a str,
    /// `None` until the answer has been disclosed
    pub answer: Option<&'a str>,
}

/// One game in progress
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    teams: TeamRoster,
    turn: usize,
    state: PlayState,
}

impl GameSession {
    /// Start a game from the frozen setup data
    pub fn new(questions: &QuestionSet, roster: &CategoryRoster, teams: TeamRoster) -> Self {
        let board = Board::new(questions, roster);
        log::info!(
            "New game: {} categories, {} rows, {} playable cells, {} teams",
            board.columns(),
            board.rows(),
            board.playable_total(),
            teams.len()
        );
        Self {
            board,
            teams,
            turn: 0,
            state: PlayState::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn teams(&self) -> &[Team] {
        self.teams.teams()
    }

    pub fn has_teams(&self) -> bool {
        !self.teams.is_empty()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Index of the team whose turn it is
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.turn)
    }

    pub fn cell_state(&self, cell: CellId) -> CellState {
        self.board.state(cell)
    }

    pub fn point_value(&self, cell: CellId) -> Option<i64> {
        self.board.cell(cell).map(|c| c.points())
    }

    pub fn remaining_cells(&self) -> usize {
        self.board.remaining()
    }

    /// True once every playable cell has been revealed
    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Idle && self.board.remaining() == 0
    }

    /// The question in play with its answer once disclosed
    pub fn open_question(&self) -> Option<OpenQuestion<'_>> {
        let cell = self.state.cell()?;
        let board_cell = self.board.cell(cell)?;
        let question = board_cell.question()?;
        let disclosed = !matches!(self.state, PlayState::QuestionShown { .. });
        Some(OpenQuestion {
            cell,
            category: self
                .board
                .category_names()
                .get(cell.category)
                .map(String::as_str)
                .unwrap_or_default(),
            points: board_cell.points(),
            question: &question.question,
            answer: disclosed.then_some(question.answer.as_str()),
        })
    }

    /// Teams that may claim the open question after a miss
    pub fn steal_candidates(&self) -> Vec<usize> {
        match self.state {
            PlayState::OpenToAll { original_team, .. } => (0..self.teams.len())
                .filter(|&i| i != original_team)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Teams ordered by score, highest first; ties keep turn order
    pub fn standings(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.teams().iter().collect();
        teams.sort_by(|a, b| b.score.cmp(&a.score));
        teams
    }

    /// All teams sharing the top score
    pub fn leaders(&self) -> Vec<&Team> {
        let top = match self.teams.teams().iter().map(|t| t.score).max() {
            Some(top) => top,
            None => return Vec::new(),
        };
        self.teams.teams().iter().filter(|t| t.score == top).collect()
    }

    /// Open a cell and show its question
    pub fn open_cell(&mut self, cell: CellId) -> Transition {
        self.expect_idle("open cell")?;
        match self.board.cell(cell).map(|c| c.state()) {
            None => return Err(TransitionError::CellOutOfRange(cell)),
            Some(CellState::Unavailable) => return Err(TransitionError::CellUnavailable(cell)),
            Some(CellState::Revealed) => return Err(TransitionError::CellRevealed(cell)),
            Some(CellState::Available) => {}
        }
        log::debug!("Opened cell {}", cell);
        self.state = PlayState::QuestionShown { cell };
        Ok(())
    }

    /// Close the question without playing it; the cell stays available
    pub fn dismiss(&mut self) -> Transition {
        match self.state {
            PlayState::QuestionShown { cell } => {
                log::debug!("Dismissed cell {}", cell);
                self.state = PlayState::Idle;
                Ok(())
            }
            other => Err(invalid("dismiss", other)),
        }
    }

    /// Disclose the answer
    pub fn reveal_answer(&mut self) -> Transition {
        match self.state {
            PlayState::QuestionShown { cell } => {
                self.state = PlayState::AnswerShown { cell };
                Ok(())
            }
            other => Err(invalid("reveal answer", other)),
        }
    }

    /// The acting team answered correctly
    pub fn resolve_correct(&mut self) -> Transition {
        self.require_teams("correct")?;
        let cell = self.expect_answer_shown("correct")?;
        let points = self.points_of(cell);
        let team = self.turn;

        self.award(team, points);
        self.finish_cell(cell, team);
        Ok(())
    }

    /// The acting team answered wrong: half the value is deducted and the
    /// question opens to the other teams
    pub fn resolve_wrong(&mut self) -> Transition {
        self.require_teams("wrong")?;
        let cell = self.expect_answer_shown("wrong")?;
        let points = self.points_of(cell);
        let team = self.turn;

        self.award(team, -(points / 2));
        if self.teams.len() > 1 {
            log::debug!("Cell {} open to all after miss by team {}", cell, team);
            self.state = PlayState::OpenToAll {
                cell,
                original_team: team,
            };
        } else {
            self.finish_cell(cell, team);
        }
        Ok(())
    }

    /// Another team claimed the question after a miss
    pub fn resolve_steal(&mut self, team: usize) -> Transition {
        let (cell, original_team) = match self.state {
            PlayState::OpenToAll {
                cell,
                original_team,
            } => (cell, original_team),
            other => return Err(invalid("steal", other)),
        };
        if team == original_team || team >= self.teams.len() {
            return Err(TransitionError::InvalidStealTeam(team));
        }
        let points = self.points_of(cell);

        self.award(team, points);
        self.finish_cell(cell, original_team);
        Ok(())
    }

    /// Nobody answered; the cell is retired without further scoring
    pub fn resolve_no_one(&mut self) -> Transition {
        let cell = match self.state {
            PlayState::OpenToAll { cell, .. } => cell,
            PlayState::AnswerShown { cell } if !self.has_teams() => cell,
            PlayState::AnswerShown { .. } => {
                return Err(TransitionError::TeamsPresent("no one got it"))
            }
            other => return Err(invalid("no one got it", other)),
        };
        log::info!("No one answered cell {}", cell);
        self.finish_cell(cell, self.turn);
        Ok(())
    }

    /// Retire the cell without scoring; only for games without teams
    pub fn close_without_scoring(&mut self) -> Transition {
        if self.has_teams() {
            return Err(TransitionError::TeamsPresent("close"));
        }
        match self.state {
            PlayState::QuestionShown { cell } | PlayState::AnswerShown { cell } => {
                self.board.reveal(cell);
                self.state = PlayState::Idle;
                log::debug!("Closed cell {}", cell);
                Ok(())
            }
            other => Err(invalid("close", other)),
        }
    }

    fn expect_idle(&self, operation: &'static str) -> Transition {
        match self.state {
            PlayState::Idle => Ok(()),
            other => Err(invalid(operation, other)),
        }
    }

    fn expect_answer_shown(&self, operation: &'static str) -> Transition<CellId> {
        match self.state {
            PlayState::AnswerShown { cell } => Ok(cell),
            other => Err(invalid(operation, other)),
        }
    }

    fn require_teams(&self, operation: &'static str) -> Transition {
        if self.has_teams() {
            Ok(())
        } else {
            Err(TransitionError::TeamsRequired(operation))
        }
    }

    fn points_of(&self, cell: CellId) -> i64 {
        self.point_value(cell).unwrap_or_default()
    }

    fn award(&mut self, team: usize, delta: i64) {
        if let Some(t) = self.teams.get_mut(team) {
            t.score += delta;
            log::info!("{} {:+} -> {}", t.name, delta, t.score);
        }
    }

    /// Reveal the cell, pass the turn to the team after `from`, return to idle
    fn finish_cell(&mut self, cell: CellId, from: usize) {
        self.board.reveal(cell);
        if !self.teams.is_empty() {
            self.turn = (from + 1) % self.teams.len();
        }
        self.state = PlayState::Idle;
        if self.board.remaining() == 0 {
            log::info!("Board cleared");
        }
    }
}

fn invalid(operation: &'static str, state: PlayState) -> TransitionError {
    TransitionError::InvalidState {
        operation,
        state: state.name(),
    }
}
