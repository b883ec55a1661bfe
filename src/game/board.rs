//! Board grid
//!
//! Binds questions to `(category, row)` cells and tracks which cells are
//! still playable. Cell values come from row position only.

use crate::models::{CategoryRoster, Question, QuestionSet};
use crate::POINT_STEP;
use std::fmt;

/// Position of a cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    /// Column (category index in roster order)
    pub category: usize,
    /// Row, 0 is the cheapest
    pub row: usize,
}

impl CellId {
    pub fn new(category: usize, row: usize) -> Self {
        Self { category, row }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, self.row)
    }
}

/// Lifecycle of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// No question is bound here; never selectable
    Unavailable,
    /// Question bound and not yet played
    Available,
    /// Played; permanently out of the game
    Revealed,
}

/// A single board cell
#[derive(Debug, Clone)]
pub struct Cell {
    question: Option<Question>,
    state: CellState,
    points: i64,
}

impl Cell {
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn points(&self) -> i64 {
        self.points
    }
}

/// Point value of a row
pub fn row_points(row: usize) -> i64 {
    (row as i64 + 1) * POINT_STEP
}

/// The question grid for one game
#[derive(Debug, Clone)]
pub struct Board {
    category_names: Vec<String>,
    columns: Vec<Vec<Cell>>,
    rows: usize,
}

impl Board {
    /// Lay out the board. Each category owns `question_count` rows; its
    /// questions bind to rows in authored order and any rows left over stay
    /// unavailable. The board is as tall as the tallest category.
    pub fn new(questions: &QuestionSet, roster: &CategoryRoster) -> Self {
        let rows = roster.max_question_count();
        let mut columns = Vec::with_capacity(roster.len());

        for category in roster.categories() {
            let mut bound = questions
                .for_category(&category.name)
                .take(category.question_count);

            let column = (0..rows)
                .map(|row| {
                    let question = if row < category.question_count {
                        bound.next().cloned()
                    } else {
                        None
                    };
                    let state = if question.is_some() {
                        CellState::Available
                    } else {
                        CellState::Unavailable
                    };
                    Cell {
                        question,
                        state,
                        points: row_points(row),
                    }
                })
                .collect();
            columns.push(column);
        }

        Self {
            category_names: roster.categories().iter().map(|c| c.name.clone()).collect(),
            columns,
            rows,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.columns.get(id.category).and_then(|col| col.get(id.row))
    }

    /// State of a cell; out-of-range positions read as unavailable
    pub fn state(&self, id: CellId) -> CellState {
        self.cell(id)
            .map(|c| c.state)
            .unwrap_or(CellState::Unavailable)
    }

    pub(crate) fn reveal(&mut self, id: CellId) {
        if let Some(cell) = self
            .columns
            .get_mut(id.category)
            .and_then(|col| col.get_mut(id.row))
        {
            if cell.state == CellState::Available {
                cell.state = CellState::Revealed;
            }
        }
    }

    /// Cells still playable
    pub fn remaining(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|c| c.state == CellState::Available)
            .count()
    }

    /// Cells that carry a question
    pub fn playable_total(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|c| c.question.is_some())
            .count()
    }
}
