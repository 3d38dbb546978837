//! Free-text question search.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use super::QuestionResponse;
use super::categories::category_type;
use crate::api::extract::JsonBody;
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Database, QuestionQuery, QuestionRepository};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Text to look for anywhere in the question, ignoring case
    #[serde(rename = "searchTerm")]
    #[schema(example = "title")]
    pub search_term: String,
}

#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
    /// Category of the first matching question
    #[schema(example = "History")]
    pub current_category: Option<String>,
}

#[utoipa::path(
    post,
    path = "/search",
    tag = "questions",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching questions", body = SearchResponse),
        (status = 400, description = "Body is not JSON", body = ErrorResponse),
        (status = 404, description = "Nothing matched", body = ErrorResponse),
        (status = 422, description = "Search term missing or empty", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_questions<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(req): JsonBody<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    if req.search_term.trim().is_empty() {
        return Err(ApiError::unprocessable("searchTerm is empty"));
    }

    let result = state
        .db()
        .questions()
        .list(Some(&QuestionQuery::matching(req.search_term)))
        .await?;

    let Some(first) = result.items.first() else {
        return Err(ApiError::not_found());
    };

    let current_category = category_type(state.db(), first.category).await?;
    debug!(matches = result.total, "search complete");

    Ok(Json(SearchResponse {
        success: true,
        questions: result.items.into_iter().map(QuestionResponse::from).collect(),
        total_questions: result.total,
        current_category,
    }))
}
