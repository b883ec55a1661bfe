//! Game board and session state machine

pub mod board;
pub mod session;

pub use board::{row_points, Board, Cell, CellId, CellState};
pub use session::{GameSession, OpenQuestion, PlayState, TransitionError};
