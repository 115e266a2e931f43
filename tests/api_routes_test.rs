use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use std::sync::Arc;
use study_aid::{build_router, AppState, OpenAiClient, StudyService};
use tower::ServiceExt;

const QUIZ_OUTPUT: &str = "Q1) What is a cell?\nA) A unit of life\nB) A rock\nC) A planet\nD) A song\nAnswer: A\n\n\
Q2) What controls the cell?\nA) Wall\nB) Nucleus\nC) Water\nD) Air\nAnswer: B\n\n\
Q3) What makes energy?\nA) Ribosome\nB) Vacuole\nC) Mitochondria\nD) Membrane\nAnswer: C";

fn router_for(server: &MockServer) -> axum::Router {
    let client = OpenAiClient::new(
        "sk-test".to_string(),
        "gpt-4.1-mini".to_string(),
        &server.base_url(),
    );
    build_router(AppState::new(StudyService::new(Arc::new(client))))
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: axum::Router, request: Request<Body>) -> Result<(StatusCode, serde_json::Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, serde_json::from_slice(&bytes)?))
}

/// 回應必須恰好含 result 或 error 其中之一
fn assert_single_key(body: &serde_json::Value) {
    let object = body.as_object().expect("response is a JSON object");
    assert_eq!(object.len(), 1, "unexpected body: {}", body);
    assert!(object.contains_key("result") ^ object.contains_key("error"));
}

#[tokio::test]
async fn test_health_does_not_touch_upstream() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.any_request();
        then.status(500);
    });

    let request = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(router_for(&server), request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"ok": true, "model": "gpt-4.1-mini"}));

    let request = Request::builder().uri("/").body(Body::empty())?;
    let (status, body) = send(router_for(&server), request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "running"}));

    upstream.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_explain_normalizes_text_before_sending() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_partial(r#"{"model": "gpt-4.1-mini", "max_tokens": 320, "temperature": 0.4}"#)
            .body_contains(r#"{"role":"user","content":"hello world"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(completion("  A friendly explanation.  "));
    });

    let (status, body) = send(
        router_for(&server),
        post_json("/explain", r#"{"text": "  hello   world  \n"}"#),
    )
    .await?;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    assert_single_key(&body);
    assert_eq!(body["result"], "A friendly explanation.");
    Ok(())
}

#[tokio::test]
async fn test_summarize_uses_summary_budget() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .json_body_partial(r#"{"max_tokens": 220}"#)
            .body_contains("Summarize the user's selected text.");
        then.status(200)
            .json_body(completion("- Cells are small\n- Cells have parts\n- Cells make energy"));
    });

    let (status, body) = send(
        router_for(&server),
        post_json("/summarize", r#"{"text": "Cells are the basic unit of life."}"#),
    )
    .await?;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = body["result"].as_str().unwrap_or_default().lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.starts_with("- ")));
    Ok(())
}

#[tokio::test]
async fn test_quiz_returns_model_output() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .json_body_partial(r#"{"max_tokens": 420}"#)
            .body_contains("quiz maker");
        then.status(200).json_body(completion(QUIZ_OUTPUT));
    });

    let (status, body) = send(
        router_for(&server),
        post_json("/quiz", r#"{"text": "Cells, nuclei and mitochondria."}"#),
    )
    .await?;

    upstream.assert();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], QUIZ_OUTPUT);
    assert!(study_aid::domain::format::is_well_formed_quiz(
        body["result"].as_str().unwrap_or_default()
    ));
    Ok(())
}

#[tokio::test]
async fn test_missing_text_is_error_not_crash() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(completion("unused"));
    });

    for path in ["/explain", "/summarize", "/quiz"] {
        let (status, body) = send(router_for(&server), post_json(path, "{}")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_single_key(&body);
        assert_eq!(body["error"], "No text provided");

        let (status, body) =
            send(router_for(&server), post_json(path, r#"{"text": "   "}"#)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_single_key(&body);
    }

    upstream.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_and_oversized_bodies() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(completion("unused"));
    });

    let (status, body) = send(router_for(&server), post_json("/explain", "{not json")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid JSON body"));

    let (status, body) =
        send(router_for(&server), post_json("/explain", r#"{"text": 42}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_single_key(&body);

    let long_text = "a".repeat(12_001);
    let payload = serde_json::json!({ "text": long_text }).to_string();
    let (status, body) = send(router_for(&server), post_json("/explain", &payload)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("too long"));

    upstream.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_upstream_failure_becomes_error_object() -> Result<()> {
    let server = MockServer::start();
    let upstream = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(429).json_body(serde_json::json!({
            "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
        }));
    });

    let (status, body) = send(
        router_for(&server),
        post_json("/explain", r#"{"text": "Photosynthesis"}"#),
    )
    .await?;

    upstream.assert();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_single_key(&body);
    assert_eq!(
        body["error"],
        "Upstream API error (429): You exceeded your current quota"
    );
    Ok(())
}

#[tokio::test]
async fn test_cors_preflight_is_permissive() -> Result<()> {
    let server = MockServer::start();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/explain")
        .header(header::ORIGIN, "chrome-extension://abcdefghijklmnop")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())?;

    let response = router_for(&server).oneshot(request).await?;

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_json_404() -> Result<()> {
    let server = MockServer::start();
    let request = Request::builder().uri("/translate").body(Body::empty())?;
    let (status, body) = send(router_for(&server), request).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({"error": "Not found"}));
    Ok(())
}
