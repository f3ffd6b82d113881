use relay_chat::config::ApiKey;
use relay_chat::services::upstream::{
    ChatProvider, SECRET_KEY_HEADER, ThirdwebProvider, UpstreamError, UpstreamRequest,
};

use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::time::Duration;

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/ai/chat")
}

fn key() -> ApiKey {
    ApiKey::new("sk-test").unwrap()
}

#[tokio::test]
async fn sends_secret_header_and_schema() {
    let app = Router::new().route(
        "/ai/chat",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let key = headers
                .get(SECRET_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({
                "message": format!("{key}|{}", body["messages"][0]["content"].as_str().unwrap_or("")),
                "usage": { "stream": body["stream"], "chains": body["context"]["chain_ids"] }
            }))
        }),
    );
    let url = spawn_upstream(app).await;
    let provider = ThirdwebProvider::new(url, Duration::from_secs(5));

    let resp = provider
        .complete(&key(), &UpstreamRequest::single_turn("hello"))
        .await
        .unwrap();

    assert_eq!(resp.reply(), "sk-test|hello");
    assert_eq!(resp.usage, Some(json!({ "stream": false, "chains": [] })));
}

#[tokio::test]
async fn non_success_status_keeps_body_for_logs() {
    let app = Router::new().route(
        "/ai/chat",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let url = spawn_upstream(app).await;
    let provider = ThirdwebProvider::new(url, Duration::from_secs(5));

    let err = provider
        .complete(&key(), &UpstreamRequest::single_turn("hello"))
        .await
        .unwrap_err();

    match err {
        UpstreamError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn hung_upstream_times_out() {
    let app = Router::new().route(
        "/ai/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({ "message": "too late" }))
        }),
    );
    let url = spawn_upstream(app).await;
    let provider = ThirdwebProvider::new(url, Duration::from_millis(100));

    let err = provider
        .complete(&key(), &UpstreamRequest::single_turn("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Timeout(_)));
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let app = Router::new().route("/ai/chat", post(|| async { "plain text" }));
    let url = spawn_upstream(app).await;
    let provider = ThirdwebProvider::new(url, Duration::from_secs(5));

    let err = provider
        .complete(&key(), &UpstreamRequest::single_turn("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)));
}

#[tokio::test]
async fn unexpected_field_types_do_not_fail_the_reply() {
    let app = Router::new().route(
        "/ai/chat",
        post(|| async {
            Json(json!({ "message": { "text": "hi" }, "response": "fallback text", "usage": [1, 2] }))
        }),
    );
    let url = spawn_upstream(app).await;
    let provider = ThirdwebProvider::new(url, Duration::from_secs(5));

    let resp = provider
        .complete(&key(), &UpstreamRequest::single_turn("hello"))
        .await
        .unwrap();

    assert_eq!(resp.reply(), "fallback text");
    assert_eq!(resp.usage, Some(json!([1, 2])));
}
