//! Quiz play handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::QuestionResponse;
use crate::api::extract::JsonBody;
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::Database;
use crate::quiz::{self, QuizRequest};

// =============================================================================
// DTOs
// =============================================================================

/// An id sent either as a number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    /// `None` for "no id" (`0` or an empty string).
    fn into_id(self) -> Result<Option<i64>, ApiError> {
        let id = match self {
            IdValue::Number(n) => n,
            IdValue::Text(s) if s.trim().is_empty() => return Ok(None),
            IdValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ApiError::unprocessable(format!("'{}' is not a category id", s)))?,
        };
        Ok((id != 0).then_some(id))
    }
}

/// Category chosen for the quiz: a bare id, or a category object with an `id`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuizCategory {
    Id(IdValue),
    Object {
        #[serde(default)]
        id: Option<IdValue>,
    },
}

/// A previously played question: its id, or the question object itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PreviousQuestion {
    Id(i64),
    Object { id: i64 },
}

impl PreviousQuestion {
    fn id(&self) -> i64 {
        match self {
            PreviousQuestion::Id(id) | PreviousQuestion::Object { id } => *id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequestBody {
    /// Category to play; absent, null, 0 or "" plays every category
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = json!({"type": "Science", "id": 1}))]
    pub quiz_category: Option<QuizCategory>,
    /// Questions already shown, as ids or question objects
    #[serde(default)]
    #[schema(value_type = Vec<i64>, example = json!([3, 6, 8]))]
    pub previous_questions: Vec<PreviousQuestion>,
}

impl QuizRequestBody {
    fn into_request(self) -> Result<QuizRequest, ApiError> {
        let category = match self.quiz_category {
            None | Some(QuizCategory::Object { id: None }) => None,
            Some(QuizCategory::Id(id)) | Some(QuizCategory::Object { id: Some(id) }) => {
                id.into_id()?
            }
        };

        Ok(QuizRequest {
            category,
            previous: self.previous_questions.iter().map(PreviousQuestion::id).collect(),
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    pub question: QuestionResponse,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    post,
    path = "/quiz",
    tag = "quiz",
    request_body = QuizRequestBody,
    responses(
        (status = 200, description = "A random question not played yet", body = QuizResponse),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 404, description = "No questions left to play", body = ErrorResponse),
        (status = 422, description = "Body has the wrong shape", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn play_quiz<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(body): JsonBody<QuizRequestBody>,
) -> Result<Json<QuizResponse>, ApiError> {
    let request = body.into_request()?;
    let question = quiz::next_question(state.db(), &request).await?;

    Ok(Json(QuizResponse {
        success: true,
        question: QuestionResponse::from(question),
    }))
}
