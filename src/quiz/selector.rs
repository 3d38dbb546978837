use rand::Rng;
use tracing::debug;

use super::QuizError;
use crate::db::{Database, Question, QuestionQuery, QuestionRepository};

/// Constraints for one quiz round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    /// Restrict to this category; `None` plays all categories.
    pub category: Option<i64>,
    /// Ids already shown to the player.
    pub previous: Vec<i64>,
}

impl QuizRequest {
    /// The query whose result is the eligible set for this round.
    pub fn eligible_query(&self) -> QuestionQuery {
        QuestionQuery {
            category: self.category,
            exclude: self.previous.clone(),
            ..QuestionQuery::default()
        }
    }
}

/// Pick one question uniformly at random from the eligible set.
pub fn choose_question<R: Rng + ?Sized>(
    mut eligible: Vec<Question>,
    rng: &mut R,
) -> Result<Question, QuizError> {
    if eligible.is_empty() {
        return Err(QuizError::NoQuestionsAvailable);
    }

    let index = rng.random_range(0..eligible.len());
    Ok(eligible.swap_remove(index))
}

/// Load the eligible set for `request` and draw one question from it.
pub async fn next_question<D: Database>(
    db: &D,
    request: &QuizRequest,
) -> Result<Question, QuizError> {
    let eligible = db
        .questions()
        .list(Some(&request.eligible_query()))
        .await?
        .items;

    debug!(
        category = ?request.category,
        previous = request.previous.len(),
        eligible = eligible.len(),
        "selecting quiz question"
    );

    choose_question(eligible, &mut rand::rng())
}
