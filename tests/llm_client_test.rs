use mindful::config::LlmConfig;
use mindful::error::LlmError;
use mindful::llm::{MoodModel, OpenAiMoodModel};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_key: Some("test-key".into()),
        base_url: format!("{}/v1", server.uri()),
        model: "test-model".into(),
        timeout_ms: 5_000,
        max_retries: 2,
        retry_delay_ms: 1,
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn assessment_body() -> serde_json::Value {
    completion(
        &json!({
            "mood_detected": "Anxious",
            "empathy_response": "That sounds stressful.",
            "recommendation": "Try box breathing.",
            "motivational_quote": "You are stronger than you think."
        })
        .to_string(),
    )
}

#[tokio::test]
async fn assess_parses_structured_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assessment_body()))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    let assessment = model.assess("exam tomorrow").await.unwrap();
    assert_eq!(assessment.mood_detected, "Anxious");
    assert_eq!(assessment.recommendation, "Try box breathing.");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert!(body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("exam tomorrow"));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assessment_body()))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    let assessment = model.assess("hello").await.unwrap();
    assert_eq!(assessment.mood_detected, "Anxious");
}

#[tokio::test]
async fn exhausted_retries_report_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    match model.assess("hello").await {
        Err(LlmError::Unavailable { retries, message }) => {
            assert_eq!(retries, 2);
            assert!(message.contains("500"));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn persistent_rate_limit_surfaces_as_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    assert!(matches!(
        model.assess("hello").await,
        Err(LlmError::RateLimited)
    ));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    match model.assess("hello").await {
        Err(LlmError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "bad key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_assessment_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("not json")))
        .expect(1)
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    assert!(matches!(
        model.assess("hello").await,
        Err(LlmError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn missing_key_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(assessment_body()))
        .expect(0)
        .mount(&server)
        .await;

    let config = LlmConfig {
        api_key: None,
        ..config(&server)
    };
    let model = OpenAiMoodModel::new(&config).unwrap();
    assert!(matches!(
        model.assess("hello").await,
        Err(LlmError::MissingApiKey)
    ));
}

#[tokio::test]
async fn themes_returns_trimmed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("  mindfulness, nature \n")),
        )
        .mount(&server)
        .await;

    let model = OpenAiMoodModel::new(&config(&server)).unwrap();
    let themes = model.themes("need a break", "stressed").await.unwrap();
    assert_eq!(themes, "mindfulness, nature");
}
