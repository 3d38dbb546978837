//! Quiz question selection.
//!
//! A quiz round asks for one random question the player has not seen yet,
//! optionally restricted to a single category. No state is kept between
//! rounds: the caller resends the ids it has already been shown.

mod error;
mod selector;


pub use error::QuizError;
pub use selector::{QuizRequest, choose_question, next_question};
