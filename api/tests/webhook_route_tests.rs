//! `POST /webhook` driven through the router without binding a socket.

use ai_llm_service::{LlmModelConfig, LlmProvider};
use api::build_router;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use mr_reviewer::signature::expected_signature;
use mr_reviewer::{ProviderKind, RelayConfig, ReviewRelay};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &[u8] = b"route-secret";

fn app(llm_endpoint: &str) -> Router {
    let llm = LlmModelConfig {
        provider: LlmProvider::Groq,
        model: "llama-3.1-8b-instant".into(),
        endpoint: llm_endpoint.to_string(),
        api_key: Some("llm-key".into()),
        max_tokens: Some(3000),
        temperature: Some(0.1),
        top_p: None,
        timeout_secs: Some(5),
    };
    let cfg = RelayConfig::with_secret(String::from_utf8_lossy(SECRET));
    build_router(ReviewRelay::new(cfg, llm).unwrap())
}

/// Router whose outbound calls would go nowhere; for paths that must not call out.
fn offline_app() -> Router {
    app("http://127.0.0.1:9")
}

fn github_request(body: Vec<u8>) -> Request<Body> {
    let signature = expected_signature(&body, SECRET, ProviderKind::GitHub).unwrap();
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", "pull_request")
        .header("x-hub-signature-256", signature)
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ignored_event_returns_processed() {
    let body = serde_json::to_vec(&json!({"action": "closed"})).unwrap();
    let response = offline_app().oneshot(github_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        json_body(response).await,
        json!({"status": "processed", "message": "Only processing opened PRs"})
    );
}

#[tokio::test]
async fn unknown_sender_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .body(Body::from("{}"))
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_PROVIDER");
}

#[tokio::test]
async fn bad_signature_returns_403() {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-gitlab-event", "Merge Request Hook")
        .header("x-gitlab-token", "0000000000000000000000000000000000000000")
        .body(Body::from(r#"{"object_kind":"merge_request"}"#))
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_SIGNATURE");
    assert!(!body.to_string().contains("route-secret"));
}

#[tokio::test]
async fn signed_non_json_returns_400() {
    let response = offline_app()
        .oneshot(github_request(b"not json".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn opened_without_pull_request_returns_422() {
    let body = serde_json::to_vec(&json!({"action": "opened"})).unwrap();
    let response = offline_app().oneshot(github_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-request-id", "delivery-77")
        .body(Body::empty())
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "delivery-77");
}

#[tokio::test]
async fn opened_pr_is_reviewed_end_to_end() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/o/r/pull/3.diff"))
        .respond_with(ResponseTemplate::new(200).set_body_string("+fn main() {}\n"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Rating: 8/10\n\n# 🤖 AI PR Review"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/issues/3/comments"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let payload = json!({
        "action": "opened",
        "pull_request": {
            "number": 3,
            "url": format!("{base}/repos/o/r/pulls/3"),
            "diff_url": format!("{base}/o/r/pull/3.diff"),
            "comments_url": format!("{base}/repos/o/r/issues/3/comments")
        }
    });
    let response = app(&base)
        .oneshot(github_request(serde_json::to_vec(&payload).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Posted review for PR #3");
}
