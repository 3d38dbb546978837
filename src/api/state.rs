//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so the handlers never name a concrete backend;
/// the binary (or a test) picks one and injects it here.
pub struct AppState<D: Database> {
    db: Arc<D>,
    page_size: usize,
}

// Manual Clone impl - only the Arc needs cloning, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            page_size: self.page_size,
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState with the given database and questions-per-page.
    pub fn new(db: D, page_size: usize) -> Self {
        Self {
            db: Arc::new(db),
            page_size: page_size.max(1),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Number of questions on one page of `GET /questions`.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
