//! HTTP-level tests for the Gemini provider against an in-process server

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use clausewise_domain::traits::{GenerationRequest, LlmProvider, MIME_JSON};
use clausewise_llm::{GeminiProvider, LlmError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn capture(
    State(captured): State<Captured>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured
        .requests
        .lock()
        .unwrap()
        .push((uri.path().to_string(), key, body));

    Json(json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": "{\"summary\":\"ok\"}" }] }, "finishReason": "STOP" }
        ]
    }))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1beta", addr)
}

fn kind(err: &LlmError) -> &'static str {
    match err {
        LlmError::ModelNotAvailable(_) => "model",
        LlmError::RateLimitExceeded => "rate",
        LlmError::Authentication(_) => "auth",
        LlmError::Communication(_) => "comm",
        _ => "other",
    }
}

fn analysis_request() -> GenerationRequest {
    GenerationRequest {
        parts: vec!["Classify the clauses.".to_string(), "The tenant pays rent.".to_string()],
        temperature: 0.2,
        max_output_tokens: 2048,
        response_mime_type: MIME_JSON.to_string(),
        response_schema: Some(r#"{"type":"object"}"#.to_string()),
    }
}

#[tokio::test]
async fn test_generate_sends_expected_request() {
    let captured = Captured::default();
    let app = Router::new().fallback(capture).with_state(captured.clone());
    let endpoint = spawn(app).await;

    let provider = GeminiProvider::new(endpoint, "gemini-test", Some("secret".to_string()));
    let text = LlmProvider::generate(&provider, &analysis_request()).await.unwrap();
    assert_eq!(text, r#"{"summary":"ok"}"#);

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (path, key, body) = &requests[0];
    assert_eq!(path, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(key.as_deref(), Some("secret"));
    assert_eq!(body["contents"][0]["parts"][1]["text"], "The tenant pays rent.");
    let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.2).abs() < 1e-6);
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "object");
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let cases = [
        (StatusCode::NOT_FOUND, "model"),
        (StatusCode::TOO_MANY_REQUESTS, "rate"),
        (StatusCode::FORBIDDEN, "auth"),
        (StatusCode::INTERNAL_SERVER_ERROR, "comm"),
    ];

    for (status, expected) in cases {
        let app = Router::new().fallback(move || async move { (status, "nope").into_response() });
        let endpoint = spawn(app).await;
        let provider = GeminiProvider::new(endpoint, "gemini-test", Some("secret".to_string()));

        let err = LlmProvider::generate(&provider, &analysis_request())
            .await
            .unwrap_err();
        assert_eq!(kind(&err), expected, "status {} produced {:?}", status, err);
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().fallback(|| async { "not json at all" });
    let endpoint = spawn(app).await;
    let provider = GeminiProvider::new(endpoint, "gemini-test", Some("secret".to_string()));

    let err = LlmProvider::generate(&provider, &analysis_request())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}
