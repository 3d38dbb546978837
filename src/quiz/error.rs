use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

/// Quiz selection errors.
#[derive(Error, Diagnostic, Debug)]
pub enum QuizError {
    #[error("No questions available for this quiz")]
    #[diagnostic(
        code(trivia::quiz::no_questions),
        help("every matching question was already played, or the category is empty")
    )]
    NoQuestionsAvailable,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] DbError),
}
