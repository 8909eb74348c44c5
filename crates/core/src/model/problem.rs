use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised when problem bank content cannot be accepted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    /// The supplied text is not a `{category: [{name, difficulty}]}` document.
    #[error("problem bank is not a category-to-problem-list mapping: {0}")]
    InvalidShape(String),
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A named practice exercise with a free-form difficulty label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Problem {
    name: String,
    difficulty: String,
}

impl Problem {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            difficulty: difficulty.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }
}

//
// ─── PROBLEM BANK ──────────────────────────────────────────────────────────────
//

/// Categories mapped to their ordered problem lists.
///
/// Categories iterate in name order. Problems keep the order they were loaded in.
/// The bank accepts categories with no problems; the schedule generator is the
/// one that rejects them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemBank {
    categories: BTreeMap<String, Vec<Problem>>,
}

impl ProblemBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bank from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `BankError::InvalidShape` when the text is not valid JSON or does not
    /// describe a mapping of category names to lists of `{name, difficulty}` objects.
    pub fn from_json(text: &str) -> Result<Self, BankError> {
        serde_json::from_str(text).map_err(|e| BankError::InvalidShape(e.to_string()))
    }

    /// Add a problem under `category`, creating the category if needed.
    pub fn insert(&mut self, category: impl Into<String>, problem: Problem) {
        self.categories
            .entry(category.into())
            .or_default()
            .push(problem);
    }

    /// Builder-style variant of [`ProblemBank::insert`].
    #[must_use]
    pub fn with_problem(mut self, category: impl Into<String>, problem: Problem) -> Self {
        self.insert(category, problem);
        self
    }

    /// Category names in iteration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Problems listed under `category`, if the category exists.
    #[must_use]
    pub fn problems(&self, category: &str) -> Option<&[Problem]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Iterate over `(category, problems)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Problem])> {
        self.categories
            .iter()
            .map(|(name, problems)| (name.as_str(), problems.as_slice()))
    }

    /// Returns true when `category` lists a problem called `problem_name`.
    #[must_use]
    pub fn contains(&self, category: &str, problem_name: &str) -> bool {
        self.problems(category)
            .is_some_and(|problems| problems.iter().any(|p| p.name() == problem_name))
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of problems across all categories.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
