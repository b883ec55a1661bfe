//! Question and category data models
//!
//! A question set is the flat list of records that is loaded from or exported
//! to `jeopardy-questions.json`. The category roster is the ordered list of
//! board columns with the number of rows each one owns.

use serde::{Deserialize, Serialize};

/// A single trivia record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Category (board column) this question belongs to
    pub category: String,
    /// Question text shown when the cell is opened
    pub question: String,
    /// Answer text shown after disclosure
    pub answer: String,
    /// Authored point value. The board derives cell values from row position
    /// and does not read this field.
    pub points: i64,
}

impl Question {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        points: i64,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
            points,
        }
    }
}

/// Ordered collection of questions, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) {
        self.questions.extend(questions);
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Questions of one category in authored order. Names match ignoring ASCII case.
    pub fn for_category<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions
            .iter()
            .filter(move |q| q.category.eq_ignore_ascii_case(name))
    }
}

impl From<Vec<Question>> for QuestionSet {
    fn from(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

/// A board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, unique within a roster
    pub name: String,
    /// Number of board rows this category owns (1..=10)
    pub question_count: usize,
}

impl Category {
    pub fn new(name: impl Into<String>, question_count: usize) -> Self {
        Self {
            name: name.into(),
            question_count,
        }
    }
}

/// Ordered list of board columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRoster {
    categories: Vec<Category>,
}

impl CategoryRoster {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Derive a roster from a question set: distinct categories in order of
    /// first appearance, each owning as many rows as it has questions. Names
    /// differing only in ASCII case share a column spelled as first seen.
    pub fn from_questions(set: &QuestionSet) -> Self {
        let mut categories: Vec<Category> = Vec::new();
        for question in set.iter() {
            match categories
                .iter_mut()
                .find(|c| c.name.eq_ignore_ascii_case(&question.category))
            {
                Some(category) => category.question_count += 1,
                None => categories.push(Category::new(question.category.clone(), 1)),
            }
        }
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Row count of the tallest column
    pub fn max_question_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.question_count)
            .max()
            .unwrap_or(0)
    }
}
