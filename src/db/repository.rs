//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Category, ListResult, NewQuestion, Question, QuestionQuery},
};

/// Repository for Category operations. Categories are read-only.
pub trait CategoryRepository: Send + Sync {
    /// Get a category by ID.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Category>> + Send;

    /// Get all categories ordered by ID.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Category>>> + Send;
}

/// Repository for Question operations.
pub trait QuestionRepository: Send + Sync {
    /// Store a new question and return it with its assigned ID.
    fn create(&self, question: &NewQuestion) -> impl Future<Output = DbResult<Question>> + Send;

    /// Get a question by ID.
    fn get(&self, id: i64) -> impl Future<Output = DbResult<Question>> + Send;

    /// List questions matching the query, ordered by ID.
    fn list(
        &self,
        query: Option<&QuestionQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Question>>> + Send;

    /// Delete a question by ID.
    fn delete(&self, id: i64) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Repositories are exposed through associated types so handlers stay
/// generic over the backend without dynamic dispatch.
pub trait Database: Send + Sync + 'static {
    type Categories<'a>: CategoryRepository
    where
        Self: 'a;
    type Questions<'a>: QuestionRepository
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the category repository.
    fn categories(&self) -> Self::Categories<'_>;

    /// Get the question repository.
    fn questions(&self) -> Self::Questions<'_>;
}
