//! Gemini provider against a local stand-in for the chat completions API.

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};

use legiscan_core::config::LlmConfig;
use legiscan_llm::{GeminiProvider, LlmError, LlmProvider};

const TEST_KEY: &str = "test-gemini-key";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1beta/openai", addr)
}

fn provider(base_url: String) -> GeminiProvider {
    let config = LlmConfig {
        base_url,
        model: "gemini-test".to_string(),
        ..LlmConfig::default()
    };
    GeminiProvider::new(&config, SecretString::from(TEST_KEY.to_string())).unwrap()
}

async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TEST_KEY));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    let reply = format!("{} saw: {}", body["model"].as_str().unwrap_or_default(), prompt);
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}}]
        })),
    )
}

#[tokio::test]
async fn test_generate_returns_first_choice_content() {
    let base = serve(Router::new().route("/v1beta/openai/chat/completions", post(completions))).await;
    let llm = provider(base);

    let out = llm.generate("Summarize H.R. 1").await.unwrap();
    assert_eq!(out, "gemini-test saw: Summarize H.R. 1");
    assert_eq!(llm.name(), "gemini");
}

#[tokio::test]
async fn test_wrong_key_is_auth_failure() {
    let base = serve(Router::new().route("/v1beta/openai/chat/completions", post(completions))).await;
    let config = LlmConfig {
        base_url: base,
        ..LlmConfig::default()
    };
    let llm = GeminiProvider::new(&config, SecretString::from("wrong".to_string())).unwrap();

    let err = llm.generate("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::AuthFailed { .. }));
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let base = serve(Router::new().route(
        "/v1beta/openai/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "7")], "slow down") }),
    ))
    .await;

    let err = provider(base).generate("hi").await.unwrap_err();
    match err {
        LlmError::RateLimited { retry_after, .. } => {
            assert_eq!(retry_after, Some(std::time::Duration::from_secs(7)));
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_request_failure_with_body() {
    let base = serve(Router::new().route(
        "/v1beta/openai/chat/completions",
        post(|| async { (StatusCode::BAD_REQUEST, "input token count exceeds the maximum") }),
    ))
    .await;

    let err = provider(base).generate("very long bill").await.unwrap_err();
    match err {
        LlmError::RequestFailed { reason, .. } => {
            assert!(reason.contains("400"));
            assert!(reason.contains("input token count"));
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let base = serve(Router::new().route(
        "/v1beta/openai/chat/completions",
        post(|| async { "not json" }),
    ))
    .await;

    let err = provider(base).generate("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let base = serve(Router::new().route(
        "/v1beta/openai/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    ))
    .await;

    let err = provider(base).generate("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(format!("http://{}", addr))
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RequestFailed { .. }));
}

/// Read one HTTP request off `stream`, headers and declared body.
async fn read_request(stream: &mut tokio::net::TcpStream) {
    use tokio::io::AsyncReadExt;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_truncated_success_body_is_request_failure() {
    use tokio::io::AsyncWriteExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        read_request(&mut stream).await;
        // Promise more bytes than are sent, then hang up.
        stream
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 500\r\n\r\n{\"choices\":")
            .await
            .unwrap();
        stream.shutdown().await.unwrap();
    });

    let err = provider(format!("http://{}", addr))
        .generate("hi")
        .await
        .unwrap_err();
    match err {
        LlmError::RequestFailed { reason, .. } => {
            assert!(reason.contains("response body"), "reason: {}", reason)
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}
