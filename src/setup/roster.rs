//! Category and team roster builders
//!
//! Collect validated names during setup. Rejections carry a message suitable
//! for a notification; the builder keeps its previous contents.

use crate::models::{Category, CategoryRoster, Team, TeamRoster};
use crate::{QuizError, Result, MAX_QUESTIONS_PER_CATEGORY, MAX_TEAMS, MIN_QUESTIONS_PER_CATEGORY};

/// Collects board categories
#[derive(Debug, Clone)]
pub struct CategoryRosterBuilder {
    categories: Vec<Category>,
    question_count: usize,
    min_categories: usize,
}

impl CategoryRosterBuilder {
    pub fn new(min_categories: usize, question_count: usize) -> Self {
        Self {
            categories: Vec::new(),
            question_count: question_count
                .clamp(MIN_QUESTIONS_PER_CATEGORY, MAX_QUESTIONS_PER_CATEGORY),
            min_categories: min_categories.max(1),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn min_categories(&self) -> usize {
        self.min_categories
    }

    /// Questions per category applied to categories added from now on
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn set_question_count(&mut self, count: usize) {
        self.question_count = count.clamp(MIN_QUESTIONS_PER_CATEGORY, MAX_QUESTIONS_PER_CATEGORY);
    }

    pub fn increment_question_count(&mut self) {
        self.set_question_count(self.question_count + 1);
    }

    pub fn decrement_question_count(&mut self) {
        self.set_question_count(self.question_count.saturating_sub(1));
    }

    /// Add a category with the current question count
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::ValidationError(
                "Category name cannot be empty".to_string(),
            ));
        }
        if self
            .categories
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(QuizError::ValidationError(format!(
                "Category \"{}\" already exists",
                name
            )));
        }
        self.categories
            .push(Category::new(name, self.question_count));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Category> {
        (index < self.categories.len()).then(|| self.categories.remove(index))
    }

    /// Categories still missing before entry can start
    pub fn missing(&self) -> usize {
        self.min_categories.saturating_sub(self.categories.len())
    }

    pub fn can_advance(&self) -> bool {
        self.missing() == 0
    }

    pub fn finish(&self) -> Result<CategoryRoster> {
        if !self.can_advance() {
            return Err(QuizError::ValidationError(format!(
                "Add {} more categories",
                self.missing()
            )));
        }
        Ok(CategoryRoster::new(self.categories.clone()))
    }
}

/// Collects playing teams
#[derive(Debug, Clone)]
pub struct TeamRosterBuilder {
    teams: Vec<Team>,
    max_teams: usize,
}

impl TeamRosterBuilder {
    pub fn new(max_teams: usize) -> Self {
        Self {
            teams: Vec::new(),
            max_teams: max_teams.clamp(1, MAX_TEAMS),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn max_teams(&self) -> usize {
        self.max_teams
    }

    pub fn is_full(&self) -> bool {
        self.teams.len() >= self.max_teams
    }

    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::ValidationError(
                "Team name cannot be empty".to_string(),
            ));
        }
        if self.is_full() {
            return Err(QuizError::ValidationError(format!(
                "At most {} teams can play",
                self.max_teams
            )));
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(QuizError::ValidationError(format!(
                "Team \"{}\" already exists",
                name
            )));
        }
        self.teams.push(Team::new(name));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Team> {
        (index < self.teams.len()).then(|| self.teams.remove(index))
    }

    /// Freeze the roster. An empty roster is a valid game without teams.
    pub fn finish(&self) -> TeamRoster {
        TeamRoster::new(self.teams.clone())
    }
}
