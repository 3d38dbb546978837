//! Shared helpers for the handler tests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, DEFAULT_PAGE_SIZE, routes};
use crate::db::{Database, NewQuestion, QuestionRepository, SqliteDatabase};

/// Create a migrated in-memory database
pub async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

/// Insert `(question, category)` pairs and return the assigned ids in order
pub async fn seed(db: &SqliteDatabase, questions: &[(&str, i64)]) -> Vec<i64> {
    let mut ids = vec![];
    for (i, (question, category)) in questions.iter().enumerate() {
        let created = db
            .questions()
            .create(&NewQuestion {
                question: question.to_string(),
                answer: format!("Answer {}", i),
                category: *category,
                difficulty: 2,
            })
            .await
            .expect("Seeding should succeed");
        ids.push(created.id);
    }
    ids
}

/// Router over `db` with the default page size and docs disabled
pub fn app(db: SqliteDatabase) -> Router {
    routes::create_router(AppState::new(db, DEFAULT_PAGE_SIZE), false)
}

/// Router with the given questions already stored
pub async fn test_app(questions: &[(&str, i64)]) -> (Router, Vec<i64>) {
    let db = setup_db().await;
    let ids = seed(&db, questions).await;
    (app(db), ids)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send a request and parse the JSON response body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Assert the standard error envelope
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "unexpected status, body: {}", body);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}
