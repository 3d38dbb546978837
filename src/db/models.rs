//! Domain models for the trivia database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Lowest difficulty a question may carry.
pub const MIN_DIFFICULTY: i64 = 1;
/// Highest difficulty a question may carry.
pub const MAX_DIFFICULTY: i64 = 5;

// =============================================================================
// Query Types for Pagination and Filtering
// =============================================================================

/// Base pagination options - composed into entity-specific queries.
#[derive(Debug, Clone, Default)]
pub struct PageSort {
    /// Maximum number of items to return.
    pub limit: Option<usize>,
    /// Number of items to skip.
    pub offset: Option<usize>,
}

/// Query for Questions.
///
/// Every filter that is set narrows the result; filters combine with AND.
/// Results are always ordered by ascending id.
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    pub page: PageSort,
    /// Only questions in this category.
    pub category: Option<i64>,
    /// Skip questions whose id is listed here.
    pub exclude: Vec<i64>,
    /// Case-insensitive substring of the question text.
    pub search: Option<String>,
}

impl QuestionQuery {
    pub fn in_category(category: i64) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn matching(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
    /// Limit that was applied.
    pub limit: Option<usize>,
    /// Offset that was applied.
    pub offset: usize,
}

// =============================================================================
// Entities
// =============================================================================

/// A question category such as "Science" or "History".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Id of the owning category.
    pub category: i64,
    pub difficulty: i64,
}

/// A question that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// Id-keyed lookup of category display names.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    types: HashMap<i64, String>,
}

impl CategoryIndex {
    /// Display name of the category with the given id, if it exists.
    pub fn type_of(&self, id: i64) -> Option<&str> {
        self.types.get(&id).map(String::as_str)
    }
}

impl<'a> FromIterator<&'a Category> for CategoryIndex {
    fn from_iter<I: IntoIterator<Item = &'a Category>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|c| (c.id, c.kind.clone()))
                .collect(),
        }
    }
}
