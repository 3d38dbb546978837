//! API route configuration.

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::ErrorResponse;
use super::handlers::{
    self, CategoriesResponse, CategoryQuestionsResponse, CategoryResponse, CreateQuestionRequest,
    DeleteQuestionResponse, HealthResponse, MessageResponse, QuestionDetailResponse,
    QuestionPage, QuestionResponse, QuizRequestBody, QuizResponse, SearchRequest, SearchResponse,
    SubmitQuestionResponse,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
/// Several methods may share one path: `get, delete "/x/{id}" => a, b;`.
macro_rules! routes {
    ($D:ty => {
        $($first:ident $(, $method:ident)* $path:literal => $first_handler:ident $(, $handler:ident)*);* $(;)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route(
                $path,
                $first(handlers::$first_handler::<$D>)$(.$method(handlers::$handler::<$D>))*,
            );
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trivia API",
        version = "0.1.0",
        description = "Questions, categories, search and quiz play for the trivia game",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_categories,
        handlers::list_category_questions,
        handlers::list_questions,
        handlers::get_question,
        handlers::create_question,
        handlers::delete_question,
        handlers::search_questions,
        handlers::play_quiz,
    ),
    components(
        schemas(
            MessageResponse,
            HealthResponse,
            CategoryResponse,
            CategoriesResponse,
            CategoryQuestionsResponse,
            QuestionResponse,
            QuestionPage,
            QuestionDetailResponse,
            CreateQuestionRequest,
            SubmitQuestionResponse,
            DeleteQuestionResponse,
            SearchRequest,
            SearchResponse,
            QuizRequestBody,
            QuizResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "categories", description = "Category listing"),
        (name = "questions", description = "Question management and search"),
        (name = "quiz", description = "Quiz play")
    )
)]
pub struct ApiDoc;

/// Cross-origin policy: any origin, the verbs the API uses.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
}

/// Create the API router, with the OpenAPI UI at /docs when `enable_docs` is set
pub fn create_router<D: Database>(state: AppState<D>, enable_docs: bool) -> Router {
    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    let category_routes = routes!(D => {
        get "/categories" => list_categories;
        get "/categories/{id}/questions" => list_category_questions;
    });

    let question_routes = routes!(D => {
        get, post "/questions" => list_questions, create_question;
        get, delete "/questions/{id}" => get_question, delete_question;
        post "/questions/submit" => create_question;
        delete "/delete_question/{id}" => delete_question;
        post "/search" => search_questions;
    });

    let quiz_routes = routes!(D => {
        post "/quiz" => play_quiz;
    });

    let mut router = system_routes
        .merge(category_routes)
        .merge(question_routes)
        .merge(quiz_routes)
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state);

    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router.layer(cors_layer())
}
