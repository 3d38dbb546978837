//! HTTP error taxonomy and the JSON error envelope.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::db::DbError;
use crate::quiz::QuizError;

const NOT_FOUND_MESSAGE: &str = "resource not found";
const NO_QUESTIONS_MESSAGE: &str = "no more questions available";

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    /// HTTP status code, repeated in the body
    #[schema(example = 404)]
    pub error: u16,
    #[schema(example = "resource not found")]
    pub message: String,
}

/// Request failures, one variant per status code the API answers with.
///
/// The `detail` fields are logged but never sent to the client.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("bad request: {detail}")]
    #[diagnostic(code(trivia::api::bad_request))]
    BadRequest { detail: String },

    #[error("{message}")]
    #[diagnostic(code(trivia::api::not_found))]
    NotFound { message: &'static str },

    #[error("method not allowed")]
    #[diagnostic(code(trivia::api::method_not_allowed))]
    MethodNotAllowed,

    #[error("unprocessable: {detail}")]
    #[diagnostic(code(trivia::api::unprocessable))]
    Unprocessable { detail: String },

    #[error("store failure: {0}")]
    #[diagnostic(code(trivia::api::internal))]
    Internal(#[source] DbError),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found() -> Self {
        ApiError::NotFound {
            message: NOT_FOUND_MESSAGE,
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        ApiError::Unprocessable {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable { .. } | ApiError::Internal(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "bad request",
            ApiError::NotFound { message } => *message,
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable { .. } | ApiError::Internal(_) => "unprocessable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(source) => error!(error = %source, "request failed"),
            other => debug!(error = %other, "request rejected"),
        }

        let status = self.status();
        let body = ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::not_found(),
            DbError::Validation { message } => ApiError::unprocessable(message),
            other => ApiError::Internal(other),
        }
    }
}

impl From<QuizError> for ApiError {
    fn from(e: QuizError) -> Self {
        match e {
            QuizError::NoQuestionsAvailable => ApiError::NotFound {
                message: NO_QUESTIONS_MESSAGE,
            },
            QuizError::Store(e) => e.into(),
        }
    }
}

/// Well-formed JSON of the wrong shape is unprocessable; anything that is
/// not JSON at all is a bad request.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::unprocessable(e.body_text()),
            other => ApiError::bad_request(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Error raised while starting or running the server.
#[derive(Error, Diagnostic, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(trivia::api::bind),
        help("Is another process already listening on this address?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(trivia::api::serve))]
    Serve(#[source] std::io::Error),
}
