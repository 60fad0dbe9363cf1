// tests/provider_test.rs — OpenAI-compatible client against a local mock server

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use autocoder::infra::errors::AutoCoderError;
use autocoder::provider::openai_compat::OpenAICompatProvider;
use autocoder::provider::{ChatRequest, ModelProvider};

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.seen.lock().unwrap().push((auth, body));
    (state.status, Json(state.reply.clone()))
}

/// Serve `reply` with `status` on an ephemeral port; returns the base URL.
async fn spawn_mock(status: StatusCode, reply: Value) -> (String, MockState) {
    let state = MockState {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1"), state)
}

fn provider(base_url: String) -> OpenAICompatProvider {
    OpenAICompatProvider::new("openrouter", "OpenRouter", "sk-test".into(), base_url)
}

#[tokio::test]
async fn test_chat_sends_system_and_user_and_reads_content() {
    let (url, state) = spawn_mock(
        StatusCode::OK,
        json!({
            "choices": [{"message": {"role": "assistant", "content": "<code>print(\"hello\")</code>"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7}
        }),
    )
    .await;

    let resp = provider(url)
        .chat(ChatRequest::system_and_user(
            "deepseek/deepseek-r1",
            "system text",
            "Create a new Python program for: print hello",
        ))
        .await
        .unwrap();

    assert_eq!(resp.content, "<code>print(\"hello\")</code>");
    assert_eq!(resp.usage.input_tokens, 12);
    assert_eq!(resp.usage.output_tokens, 7);

    let seen = state.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "deepseek/deepseek-r1");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "system text");
    assert_eq!(body["messages"][1]["role"], "user");
}

#[tokio::test]
async fn test_http_error_is_provider_error() {
    let (url, _) = spawn_mock(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"message": "overloaded"}}),
    )
    .await;

    let err = provider(url)
        .chat(ChatRequest::system_and_user("m", "s", "u"))
        .await
        .unwrap_err();

    match err {
        AutoCoderError::Provider {
            message, retriable, ..
        } => {
            assert!(message.contains("503"));
            assert!(message.contains("overloaded"));
            assert!(retriable);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_auth_error_not_retriable() {
    let (url, _) = spawn_mock(StatusCode::UNAUTHORIZED, json!({"error": "bad key"})).await;

    let err = provider(url)
        .chat(ChatRequest::system_and_user("m", "s", "u"))
        .await
        .unwrap_err();

    assert!(!err.is_retriable());
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let (url, _) = spawn_mock(StatusCode::OK, json!({"choices": []})).await;

    let err = provider(url)
        .chat(ChatRequest::system_and_user("m", "s", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, AutoCoderError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_provider_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(format!("http://{addr}/v1"))
        .chat(ChatRequest::system_and_user("m", "s", "u"))
        .await
        .unwrap_err();

    assert!(matches!(err, AutoCoderError::Provider { .. }));
}
