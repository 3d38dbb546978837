//! Question management handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

use super::CategoryResponse;
use crate::api::extract::{JsonBody, PathId, QueryParams};
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{
    CategoryIndex, CategoryRepository, Database, DbError, MAX_DIFFICULTY, MIN_DIFFICULTY,
    NewQuestion, PageSort, Question, QuestionQuery, QuestionRepository,
};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct QuestionResponse {
    #[schema(example = 5)]
    pub id: i64,
    #[schema(example = "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?")]
    pub question: String,
    #[schema(example = "Maya Angelou")]
    pub answer: String,
    /// Category ID
    #[schema(example = 4)]
    pub category: i64,
    /// 1 (easy) to 5 (hard)
    #[schema(example = 2)]
    pub difficulty: i64,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuestionsQuery {
    /// 1-based page number
    #[param(example = 1)]
    pub page: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    /// Number of questions across all pages
    pub total_questions: usize,
    pub categories: Vec<CategoryResponse>,
    /// Category of the first question on the page
    #[schema(example = "Science")]
    pub current_category: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct QuestionDetailResponse {
    pub success: bool,
    pub question: QuestionResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    #[schema(example = "What species are orangutans?")]
    pub question: String,
    #[schema(example = "Great apes")]
    pub answer: String,
    #[schema(example = 2)]
    pub difficulty: i64,
    /// Category ID
    #[schema(example = 1)]
    pub category: i64,
}

/// Outcome of a submission.
///
/// Values that are well-formed but out of range (unknown category,
/// difficulty outside 1-5) are answered with `success: false` and a message
/// instead of an error status.
#[derive(Serialize, ToSchema)]
pub struct SubmitQuestionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "category does not exist")]
    pub message: Option<String>,
}

impl SubmitQuestionResponse {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            question: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    /// ID of the removed question
    #[schema(example = 12)]
    pub deleted: i64,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(ListQuestionsQuery),
    responses(
        (status = 200, description = "One page of questions", body = QuestionPage),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_questions<D: Database>(
    State(state): State<AppState<D>>,
    QueryParams(query): QueryParams<ListQuestionsQuery>,
) -> Result<Json<QuestionPage>, ApiError> {
    let page_size = state.page_size();
    let offset = query
        .page
        .unwrap_or(1)
        .checked_sub(1)
        .and_then(|p| usize::try_from(p).ok())
        .and_then(|p| p.checked_mul(page_size))
        // SQLite OFFSET is a signed 64-bit integer
        .filter(|offset| i64::try_from(*offset).is_ok())
        .ok_or_else(ApiError::not_found)?;

    let db_query = QuestionQuery {
        page: PageSort {
            limit: Some(page_size),
            offset: Some(offset),
        },
        ..QuestionQuery::default()
    };

    let result = state.db().questions().list(Some(&db_query)).await?;

    // An empty store has no pages at all
    if result.items.is_empty() {
        return Err(ApiError::not_found());
    }

    let categories = state.db().categories().list().await?;
    let index: CategoryIndex = categories.iter().collect();
    let current_category = result
        .items
        .first()
        .and_then(|q| index.type_of(q.category))
        .map(str::to_string);

    Ok(Json(QuestionPage {
        success: true,
        questions: result.items.into_iter().map(QuestionResponse::from).collect(),
        total_questions: result.total,
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
        current_category,
    }))
}

#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question found", body = QuestionDetailResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Invalid question ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_question<D: Database>(
    State(state): State<AppState<D>>,
    PathId(id): PathId,
) -> Result<Json<QuestionDetailResponse>, ApiError> {
    let question = state.db().questions().get(id).await?;

    Ok(Json(QuestionDetailResponse {
        success: true,
        question: QuestionResponse::from(question),
    }))
}

#[utoipa::path(
    post,
    path = "/questions/submit",
    tag = "questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 200, description = "Question stored, or rejected with success=false", body = SubmitQuestionResponse),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 404, description = "Required field is blank", body = ErrorResponse),
        (status = 422, description = "Body has the wrong shape", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_question<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(req): JsonBody<CreateQuestionRequest>,
) -> Result<Json<SubmitQuestionResponse>, ApiError> {
    let question = req.question.trim();
    let answer = req.answer.trim();

    if question.is_empty() || answer.is_empty() || req.difficulty == 0 || req.category == 0 {
        return Err(ApiError::not_found());
    }

    match state.db().categories().get(req.category).await {
        Ok(_) => {}
        Err(DbError::NotFound { .. }) => {
            return Ok(Json(SubmitQuestionResponse::rejected(
                "category does not exist",
            )));
        }
        Err(e) => return Err(e.into()),
    }

    if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&req.difficulty) {
        return Ok(Json(SubmitQuestionResponse::rejected(format!(
            "difficulty must be between {} and {}",
            MIN_DIFFICULTY, MAX_DIFFICULTY
        ))));
    }

    let created = state
        .db()
        .questions()
        .create(&NewQuestion {
            question: question.to_string(),
            answer: answer.to_string(),
            category: req.category,
            difficulty: req.difficulty,
        })
        .await?;

    info!(id = created.id, category = created.category, "question created");

    Ok(Json(SubmitQuestionResponse {
        success: true,
        question: Some(QuestionResponse::from(created)),
        message: None,
    }))
}

#[utoipa::path(
    delete,
    path = "/delete_question/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question deleted", body = DeleteQuestionResponse),
        (status = 404, description = "Question not found", body = ErrorResponse),
        (status = 422, description = "Invalid question ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_question<D: Database>(
    State(state): State<AppState<D>>,
    PathId(id): PathId,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    state.db().questions().delete(id).await?;

    info!(id, "question deleted");

    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: id,
    }))
}
