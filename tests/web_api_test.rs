mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use helpers::{sample_entry, test_state, FakeModel};
use mindful::error::LlmError;
use mindful::web::build_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn health_reports_version() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), Arc::new(FakeModel::new("happy"))));

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn analyze_returns_result_and_records_history() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(FakeModel::new("Calm")));
    let app = build_router(state.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/analyze-mood",
            json!({ "text_input": "quiet evening", "analysis_mode": "text" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["mood_detected"], "Calm");
    assert!(body["music_recommendation"]["title"].is_string());
    assert!(body["book_recommendation"]["genre"].is_string());
    assert!(body["place_recommendation"]["type"].is_string());
    assert!(body.get("confidence").is_none());

    assert_eq!(state.history.lock().await.len(), 1);

    let response = app.oneshot(get("/api/history")).await.unwrap();
    let history = extract_json(response.into_body()).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["mood_detected"], "Calm");
    assert!(history[0]["id"].is_string());
}

#[tokio::test]
async fn missing_text_is_a_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::new("happy"));
    let app = build_router(test_state(dir.path(), model.clone()));

    let response = app
        .oneshot(post_json("/api/analyze-mood", json!({ "voice_data": "aGVsbG8=" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "error": "text_input is required" }));
    assert_eq!(model.assess_count(), 0);
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_requests() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::new("happy"));
    let app = build_router(test_state(dir.path(), model.clone()));

    let raw = |body: &str, content_type: Option<&str>| {
        let mut builder = Request::builder().method("POST").uri("/api/analyze-mood");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    };

    let requests = [
        raw("{not json", Some("application/json")),
        raw(r#"{"text_input": 42}"#, Some("application/json")),
        raw(
            r#"{"text_input": "hi", "analysis_mode": "smell"}"#,
            Some("application/json"),
        ),
        raw(r#"{"text_input": "hi"}"#, None),
    ];
    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }
    assert_eq!(model.assess_count(), 0);
}

#[tokio::test]
async fn missing_api_key_is_a_server_error_with_fixed_message() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::new("x").failing_assess(|| LlmError::MissingApiKey));
    let app = build_router(test_state(dir.path(), model));

    let response = app
        .oneshot(post_json("/api/analyze-mood", json!({ "text_input": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "OpenAI API key not configured");
}

#[tokio::test]
async fn rate_limit_maps_to_429() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::new("x").failing_assess(|| LlmError::RateLimited));
    let state = test_state(dir.path(), model);
    let app = build_router(state.clone());

    let response = app
        .oneshot(post_json("/api/analyze-mood", json!({ "text_input": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
    assert!(state.history.lock().await.is_empty());
}

#[tokio::test]
async fn other_failures_are_generic_500s() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(FakeModel::new("x").failing_assess(|| LlmError::Unavailable {
        message: "connection refused".into(),
        retries: 3,
    }));
    let app = build_router(test_state(dir.path(), model));

    let response = app
        .oneshot(post_json("/api/analyze-mood", json!({ "text_input": "hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({ "error": "Failed to analyze mood" }));
}

#[tokio::test]
async fn history_limit_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(FakeModel::new("happy")));
    {
        let mut history = state.history.lock().await;
        for mood in ["sad", "calm", "happy"] {
            history.record(sample_entry(mood, None)).unwrap();
        }
    }
    let app = build_router(state);

    let response = app.clone().oneshot(get("/api/history?limit=2")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let moods: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood_detected"].as_str().unwrap())
        .collect();
    assert_eq!(moods, vec!["happy", "calm"]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/history")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn pattern_summarizes_history() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path(), Arc::new(FakeModel::new("happy")));
    {
        let mut history = state.history.lock().await;
        // recorded oldest first, so the newest-first order is happy, happy, sad, happy, anxious
        for (mood, confidence) in [
            ("anxious", 0.7),
            ("happy", 0.85),
            ("sad", 0.6),
            ("happy", 0.8),
            ("happy", 0.9),
        ] {
            history
                .record(sample_entry(mood, Some(confidence)))
                .unwrap();
        }
    }
    let app = build_router(state);

    let response = app.oneshot(get("/api/pattern")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["mostCommonMood"], "happy");
    assert!((body["averageConfidence"].as_f64().unwrap() - 0.77).abs() < 1e-9);
    assert_eq!(body["moodFrequency"], json!({ "anxious": 1, "happy": 3, "sad": 1 }));
    assert_eq!(body["recentMoods"].as_array().unwrap().len(), 5);
    assert!(body["insight"].as_str().unwrap().contains("happy"));
}

#[tokio::test]
async fn empty_pattern_is_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), Arc::new(FakeModel::new("happy"))));

    let response = app.oneshot(get("/api/pattern")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["trend"], "stable");
    assert_eq!(body["mostCommonMood"], "neutral");
    assert_eq!(body["averageConfidence"], 0.0);
}
