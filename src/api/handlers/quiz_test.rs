//! Integration tests for POST /quiz.

use std::collections::HashSet;

use axum::http::StatusCode;
use serde_json::json;

use super::test_support::{assert_error, get, post_json, post_raw, send, test_app};

const QUESTIONS: &[(&str, i64)] = &[
    ("What is the heaviest organ in the human body?", 1),
    ("Who discovered penicillin?", 1),
    ("Hematology is a branch of medicine involving the study of what?", 1),
    ("Which Dutch graphic artist was a creator of optical illusions?", 2),
    ("La Giaconda is better known as what?", 2),
    ("What is the largest lake in Africa?", 3),
];

#[tokio::test(flavor = "multi_thread")]
async fn quiz_excludes_previous_questions() {
    let (app, ids) = test_app(QUESTIONS).await;
    let previous = &ids[..5];

    for _ in 0..10 {
        let (status, body) = send(
            &app,
            post_json(
                "/quiz",
                &json!({"previous_questions": previous, "quiz_category": null}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["question"]["id"], ids[5]);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_restricts_to_category() {
    let (app, _) = test_app(QUESTIONS).await;

    for _ in 0..10 {
        let (status, body) = send(
            &app,
            post_json(
                "/quiz",
                &json!({"previous_questions": [], "quiz_category": {"type": "Art", "id": 2}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], 2);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_combines_category_and_previous() {
    let (app, ids) = test_app(QUESTIONS).await;

    let (status, body) = send(
        &app,
        post_json(
            "/quiz",
            &json!({"previous_questions": [ids[0], ids[1]], "quiz_category": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], ids[2]);
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_plays_every_question_once() {
    let (app, ids) = test_app(QUESTIONS).await;
    let mut previous: Vec<i64> = vec![];

    for _ in 0..ids.len() {
        let (status, body) = send(
            &app,
            post_json("/quiz", &json!({"previous_questions": previous})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        previous.push(body["question"]["id"].as_i64().unwrap());
    }

    let played: HashSet<i64> = previous.iter().copied().collect();
    assert_eq!(played, ids.iter().copied().collect());

    let (status, body) = send(
        &app,
        post_json("/quiz", &json!({"previous_questions": previous})),
    )
    .await;
    assert_error(
        status,
        &body,
        StatusCode::NOT_FOUND,
        "no more questions available",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_handles_very_long_previous_list() {
    let (app, ids) = test_app(&QUESTIONS[..1]).await;

    let previous: Vec<i64> = (ids[0] + 1..ids[0] + 40_001).collect();
    let (status, body) = send(
        &app,
        post_json("/quiz", &json!({"previous_questions": previous})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], ids[0]);
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_accepts_question_objects_as_previous() {
    let (app, ids) = test_app(&QUESTIONS[..2]).await;

    let (status, body) = send(
        &app,
        post_json(
            "/quiz",
            &json!({"previous_questions": [{"id": ids[0], "question": "ignored"}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], ids[1]);
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_treats_zero_and_empty_category_as_all() {
    let (app, _) = test_app(QUESTIONS).await;

    for category in [json!(0), json!(""), json!({"type": "click", "id": 0}), json!("0")] {
        let (status, body) = send(
            &app,
            post_json(
                "/quiz",
                &json!({"previous_questions": [], "quiz_category": category}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "category {}", category);
        assert_eq!(body["success"], true);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_accepts_numeric_string_category() {
    let (app, ids) = test_app(QUESTIONS).await;

    let (status, body) = send(
        &app,
        post_json("/quiz", &json!({"quiz_category": "3"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], ids[5]);
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_with_empty_body_object_picks_any_question() {
    let (app, ids) = test_app(QUESTIONS).await;

    let (status, body) = send(&app, post_json("/quiz", &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids.contains(&body["question"]["id"].as_i64().unwrap()));
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_on_empty_category_returns_not_found() {
    let (app, _) = test_app(QUESTIONS).await;

    // Sports (id 6) has no questions
    let (status, body) = send(&app, post_json("/quiz", &json!({"quiz_category": 6}))).await;
    assert_error(
        status,
        &body,
        StatusCode::NOT_FOUND,
        "no more questions available",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_on_empty_store_returns_not_found() {
    let (app, _) = test_app(&[]).await;

    let (status, body) = send(&app, post_json("/quiz", &json!({}))).await;
    assert_error(
        status,
        &body,
        StatusCode::NOT_FOUND,
        "no more questions available",
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_with_malformed_fields_is_unprocessable() {
    let (app, _) = test_app(QUESTIONS).await;

    for payload in [
        json!({"previous_questions": "1,2"}),
        json!({"previous_questions": [true]}),
        json!({"quiz_category": "science"}),
        json!({"quiz_category": true}),
    ] {
        let (status, body) = send(&app, post_json("/quiz", &payload)).await;
        assert_error(
            status,
            &body,
            StatusCode::UNPROCESSABLE_ENTITY,
            "unprocessable",
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_without_body_is_bad_request() {
    let (app, _) = test_app(QUESTIONS).await;

    let (status, body) = send(&app, post_raw("/quiz", None, "")).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "bad request");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_on_quiz_is_method_not_allowed() {
    let (app, _) = test_app(QUESTIONS).await;

    let (status, body) = send(&app, get("/quiz")).await;
    assert_error(
        status,
        &body,
        StatusCode::METHOD_NOT_ALLOWED,
        "method not allowed",
    );
}
