//! Team roster model

use serde::{Deserialize, Serialize};

/// A playing team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Running score, negative after wrong answers
    pub score: i64,
}

impl Team {
    /// Create a team with a zero score
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
        }
    }
}

/// Ordered list of teams. Order is turn order and never changes once a game starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    teams: Vec<Team>,
}

impl TeamRoster {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Roster for a game played without teams
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, index: usize) -> Option<&Team> {
        self.teams.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Team> {
        self.teams.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl From<Vec<Team>> for TeamRoster {
    fn from(teams: Vec<Team>) -> Self {
        Self { teams }
    }
}
