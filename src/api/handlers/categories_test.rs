//! Integration tests for Category API endpoints.

use axum::http::StatusCode;
use serde_json::json;

use super::test_support::{app, assert_error, get, post_json, send, setup_db, test_app};

// =============================================================================
// GET /categories
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_categories_returns_seeded_categories() {
    let (app, _) = test_app(&[]).await;

    let (status, body) = send(&app, get("/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let categories = body["categories"].as_array().expect("Expected array");
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0], json!({"id": 1, "type": "Science"}));
    assert_eq!(categories[5], json!({"id": 6, "type": "Sports"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_categories_empty_store_returns_not_found() {
    let db = setup_db().await;
    sqlx::query("DELETE FROM category")
        .execute(db.pool())
        .await
        .unwrap();
    let app = app(db);

    let (status, body) = send(&app, get("/categories")).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn post_to_categories_is_method_not_allowed() {
    let (app, _) = test_app(&[]).await;

    let (status, body) = send(&app, post_json("/categories", &json!({}))).await;
    assert_error(
        status,
        &body,
        StatusCode::METHOD_NOT_ALLOWED,
        "method not allowed",
    );
}

// =============================================================================
// GET /categories/{id}/questions
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn category_questions_returns_only_that_category() {
    let (app, ids) = test_app(&[
        ("What is the heaviest organ?", 1),
        ("Who painted the Mona Lisa?", 2),
        ("What is the boiling point of water?", 1),
    ])
    .await;

    let (status, body) = send(&app, get("/categories/1/questions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 2);
    assert_eq!(body["current_category"], "Science");

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["id"], ids[0]);
    assert_eq!(questions[1]["id"], ids[2]);
    assert!(questions.iter().all(|q| q["category"] == 1));
}

#[tokio::test(flavor = "multi_thread")]
async fn category_questions_reports_requested_category_by_id() {
    // Sports is id 6; a positional lookup would run off the end of the list
    let (app, _) = test_app(&[("Which country won the first World Cup?", 6)]).await;

    let (status, body) = send(&app, get("/categories/6/questions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_category"], "Sports");
}

#[tokio::test(flavor = "multi_thread")]
async fn category_without_questions_returns_not_found() {
    let (app, _) = test_app(&[("Science only", 1)]).await;

    let (status, body) = send(&app, get("/categories/3/questions")).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_category_returns_not_found() {
    let (app, _) = test_app(&[("Science only", 1)]).await;

    let (status, body) = send(&app, get("/categories/1000/questions")).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn category_zero_is_unprocessable() {
    let (app, _) = test_app(&[("Science only", 1)]).await;

    let (status, body) = send(&app, get("/categories/0/questions")).await;
    assert_error(
        status,
        &body,
        StatusCode::UNPROCESSABLE_ENTITY,
        "unprocessable",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_category_is_unprocessable() {
    let (app, _) = test_app(&[]).await;

    let (status, body) = send(&app, get("/categories/science/questions")).await;
    assert_error(
        status,
        &body,
        StatusCode::UNPROCESSABLE_ENTITY,
        "unprocessable",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn created_question_round_trips_through_category_listing() {
    let (app, _) = test_app(&[]).await;

    let submitted = json!({
        "question": "What species are orangutans?",
        "answer": "Great apes",
        "difficulty": 3,
        "category": 1
    });
    let (status, body) = send(&app, post_json("/questions/submit", &submitted)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["question"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, get("/categories/1/questions")).await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    let stored = questions
        .iter()
        .find(|q| q["id"] == id)
        .expect("Created question should be listed");
    assert_eq!(stored["question"], submitted["question"]);
    assert_eq!(stored["answer"], submitted["answer"]);
    assert_eq!(stored["difficulty"], submitted["difficulty"]);
    assert_eq!(stored["category"], submitted["category"]);
}
