//! Integration tests for the analysis endpoint.
//!
//! Drive the full router with a scripted backend and a fixed transcript
//! source, and check the wire-level behavior end to end.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;

use dynamo_core::{SegmentMetadata, StaticSource, TextSegment};
use dynamo_llm::{MockBackend, MockResponse};
use dynamo_server::{Server, ServerConfig};

fn segments(contents: &[&str]) -> Vec<TextSegment> {
    contents
        .iter()
        .enumerate()
        .map(|(position, content)| {
            TextSegment::new(
                *content,
                SegmentMetadata {
                    author: "Channel".to_string(),
                    title: "Video".to_string(),
                    length_seconds: 300,
                    position,
                },
            )
        })
        .collect()
}

fn server(contents: &[&str], responses: Vec<MockResponse>, config: ServerConfig) -> Server {
    let backend = Arc::new(MockBackend::new(responses));
    let source = Arc::new(StaticSource::new(segments(contents)));
    Server::new(backend, source, config)
}

async fn post_analyze(server: Server, body: &str) -> (StatusCode, serde_json::Value) {
    let response = server
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze_video/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_analyze_video_happy_path() {
    let server = server(
        &["first chunk", "second chunk"],
        vec![
            MockResponse::text(r#"{"ownership": "who holds a value"}"#),
            MockResponse::text("```json\n{\"borrowing\": \"temporary access\"}\n```"),
        ],
        ServerConfig::new(),
    );

    let (status, json) = post_analyze(
        server,
        r#"{"youtube_link": "https://youtu.be/abc", "sample_size": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let concepts = json["key_concepts"].as_array().unwrap();
    assert_eq!(concepts.len(), 2);
    assert_eq!(concepts[0]["term"], "ownership");
    assert_eq!(concepts[1]["term"], "borrowing");
    assert_eq!(concepts[1]["definition"], "temporary access");
}

#[tokio::test]
async fn test_analyze_video_merges_duplicate_terms() {
    let server = server(
        &["a", "b"],
        vec![
            MockResponse::text(r#"{"a": "x"}"#),
            MockResponse::text(r#"{"a": "y", "b": "z"}"#),
        ],
        ServerConfig::new(),
    );

    let (status, json) = post_analyze(
        server,
        r#"{"youtube_link": "https://youtu.be/abc", "sample_size": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let concepts = json["key_concepts"].as_array().unwrap();
    assert_eq!(concepts.len(), 2);
    // Last write wins on "a", first-insertion order preserved.
    assert_eq!(concepts[0]["term"], "a");
    assert_eq!(concepts[0]["definition"], "y");
}

#[tokio::test]
async fn test_unretrievable_video_returns_empty_concepts() {
    let backend = Arc::new(MockBackend::new(vec![]));
    let source = Arc::new(StaticSource::empty());
    let server = Server::new(backend.clone(), source, ServerConfig::new());

    let (status, json) = post_analyze(server, r#"{"youtube_link": "https://youtu.be/gone"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key_concepts"].as_array().unwrap().len(), 0);
    // Retrieval failure means no LLM calls were made.
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn test_excessive_sample_size_is_bad_request() {
    let server = server(&["only one"], vec![], ServerConfig::new());

    let (status, json) = post_analyze(
        server,
        r#"{"youtube_link": "https://youtu.be/abc", "sample_size": 5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "bad_request");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("sample size exceeds")
    );
}

#[tokio::test]
async fn test_partial_group_failure_returns_partial_results() {
    let server = server(
        &["a", "b"],
        vec![
            MockResponse::error("provider down"),
            MockResponse::text(r#"{"b": "z"}"#),
        ],
        ServerConfig::new(),
    );

    let (status, json) = post_analyze(
        server,
        r#"{"youtube_link": "https://youtu.be/abc", "sample_size": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let concepts = json["key_concepts"].as_array().unwrap();
    assert_eq!(concepts.len(), 1);
    assert_eq!(concepts[0]["term"], "b");
}

#[tokio::test]
async fn test_strict_mode_rejects_malformed_model_output() {
    let server = server(
        &["a", "b"],
        vec![
            MockResponse::text("this is prose, not JSON"),
            MockResponse::text(r#"{"b": "z"}"#),
        ],
        ServerConfig::new().with_strict(true),
    );

    let (status, json) = post_analyze(
        server,
        r#"{"youtube_link": "https://youtu.be/abc", "sample_size": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "upstream_error");
}

#[tokio::test]
async fn test_malformed_request_body_is_rejected() {
    let server = server(&["a"], vec![], ServerConfig::new());

    let response = server
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze_video/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"wrong_field": true}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
