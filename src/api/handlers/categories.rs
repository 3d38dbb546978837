//! Category handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::QuestionResponse;
use crate::api::extract::PathId;
use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Category, CategoryRepository, Database, DbError, QuestionQuery, QuestionRepository};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(rename = "type")]
    #[schema(example = "Science")]
    pub kind: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            kind: c.kind,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<CategoryResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionResponse>,
    pub total_questions: usize,
    #[schema(example = "Science")]
    pub current_category: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse),
        (status = 404, description = "No categories stored", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_categories<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.db().categories().list().await?;

    if categories.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    tag = "categories",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Questions in the category", body = CategoryQuestionsResponse),
        (status = 404, description = "Category has no questions", body = ErrorResponse),
        (status = 422, description = "Invalid category ID", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_category_questions<D: Database>(
    State(state): State<AppState<D>>,
    PathId(id): PathId,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    if id == 0 {
        return Err(ApiError::unprocessable("category id 0 does not exist"));
    }

    let result = state
        .db()
        .questions()
        .list(Some(&QuestionQuery::in_category(id)))
        .await?;

    if result.items.is_empty() {
        return Err(ApiError::not_found());
    }

    let current_category = category_type(state.db(), id).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: result.items.into_iter().map(QuestionResponse::from).collect(),
        total_questions: result.total,
        current_category,
    }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Display name of a category, or `None` if the id is unknown.
pub(super) async fn category_type<D: Database>(
    db: &D,
    id: i64,
) -> Result<Option<String>, ApiError> {
    match db.categories().get(id).await {
        Ok(category) => Ok(Some(category.kind)),
        Err(DbError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
