//! Manual question entry sequencer
//!
//! Walks the category roster in order and collects `question_count`
//! question/answer pairs per category, worth 200, 400, ... by position.

use crate::game::row_points;
use crate::models::{Category, CategoryRoster, Question, QuestionSet};
use crate::{QuizError, Result};

/// Result of submitting one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryProgress {
    /// More questions remain in the current category
    NextQuestion,
    /// The category is done and the next one starts
    NextCategory,
    /// Every category is done
    Complete(QuestionSet),
}

#[derive(Debug, Clone)]
pub struct EntrySequencer {
    roster: CategoryRoster,
    category_index: usize,
    pending: Vec<Question>,
    collected: QuestionSet,
    complete: bool,
}

impl EntrySequencer {
    pub fn new(roster: CategoryRoster) -> Self {
        let complete = roster.is_empty();
        Self {
            roster,
            category_index: 0,
            pending: Vec::new(),
            collected: QuestionSet::new(),
            complete,
        }
    }

    pub fn roster(&self) -> &CategoryRoster {
        &self.roster
    }

    pub fn current_category(&self) -> Option<&Category> {
        if self.complete {
            return None;
        }
        self.roster.get(self.category_index)
    }

    /// 0-based index of the category being filled
    pub fn category_index(&self) -> usize {
        self.category_index
    }

    /// 1-based position of the next question within its category
    pub fn current_position(&self) -> usize {
        self.pending.len() + 1
    }

    pub fn current_points(&self) -> i64 {
        row_points(self.pending.len())
    }

    /// Fraction of categories finished, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.roster.is_empty() || self.complete {
            return 1.0;
        }
        self.category_index as f64 / self.roster.len() as f64
    }

    pub fn is_last_for_category(&self) -> bool {
        self.current_category()
            .map(|c| self.current_position() == c.question_count)
            .unwrap_or(false)
    }

    pub fn is_last_overall(&self) -> bool {
        self.is_last_for_category() && self.category_index + 1 == self.roster.len()
    }

    /// Record the next question. Empty text is rejected and nothing changes.
    pub fn submit(&mut self, question: &str, answer: &str) -> Result<EntryProgress> {
        let category = match self.current_category() {
            Some(category) => category.clone(),
            None => {
                return Err(QuizError::ValidationError(
                    "All categories are already complete".to_string(),
                ))
            }
        };

        let (question, answer) = (question.trim(), answer.trim());
        if question.is_empty() || answer.is_empty() {
            return Err(QuizError::ValidationError(
                "Please fill in both question and answer".to_string(),
            ));
        }

        self.pending.push(Question::new(
            category.name.clone(),
            question,
            answer,
            self.current_points(),
        ));

        if self.pending.len() < category.question_count {
            return Ok(EntryProgress::NextQuestion);
        }

        self.collected.extend(self.pending.drain(..));
        log::info!("Category \"{}\" complete", category.name);

        if self.category_index + 1 < self.roster.len() {
            self.category_index += 1;
            Ok(EntryProgress::NextCategory)
        } else {
            self.complete = true;
            Ok(EntryProgress::Complete(self.collected.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> CategoryRoster {
        CategoryRoster::new(vec![Category::new("A", 2), Category::new("B", 1)])
    }

    #[test]
    fn test_walks_categories_in_order() {
        let mut seq = EntrySequencer::new(roster());
        assert_eq!(seq.current_category().unwrap().name, "A");
        assert_eq!(seq.current_points(), 200);
        assert!(!seq.is_last_for_category());

        assert_eq!(seq.submit("q1", "a1").unwrap(), EntryProgress::NextQuestion);
        assert_eq!(seq.current_points(), 400);
        assert!(seq.is_last_for_category());
        assert!(!seq.is_last_overall());

        assert_eq!(seq.submit("q2", "a2").unwrap(), EntryProgress::NextCategory);
        assert_eq!(seq.current_category().unwrap().name, "B");
        assert_eq!(seq.current_position(), 1);
        assert!((seq.progress() - 0.5).abs() < f64::EPSILON);
        assert!(seq.is_last_overall());

        let set = match seq.submit("q3", "a3").unwrap() {
            EntryProgress::Complete(set) => set,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(
            set.questions(),
            &[
                Question::new("A", "q1", "a1", 200),
                Question::new("A", "q2", "a2", 400),
                Question::new("B", "q3", "a3", 200),
            ]
        );
        assert!(seq.current_category().is_none());
        assert!(seq.submit("q4", "a4").is_err());
    }

    #[test]
    fn test_empty_fields_rejected_without_progress() {
        let mut seq = EntrySequencer::new(roster());
        assert!(seq.submit("question", "  ").is_err());
        assert!(seq.submit("", "answer").is_err());
        assert_eq!(seq.current_position(), 1);
        assert_eq!(seq.category_index(), 0);
    }

    #[test]
    fn test_empty_roster_is_complete() {
        let seq = EntrySequencer::new(CategoryRoster::default());
        assert!(seq.current_category().is_none());
        assert!(seq.current_category().is_none());
    }
}
