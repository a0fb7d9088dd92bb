//! Tests for request rejection at the transport edge.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};

/// Non-integer value returns VALID_001
#[tokio::test]
async fn test_non_integer_value_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(&fixtures::metric_path("test"))
        .json(&serde_json::json!({ "value": "thirty" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
    assert!(ctx.registry.is_empty(), "Rejected input must not create state");
}

/// An object without a value field records zero
#[tokio::test]
async fn test_missing_value_records_zero() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(&fixtures::metric_path("test"))
        .json(&serde_json::json!({}))
        .await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({}));
    assert!(ctx.registry.get("test").is_some());

    fixtures::record(&server, "test", 5).await;
    assert_eq!(fixtures::sum(&server, "test").await, 5);
}

/// Missing body returns VALID_001
#[tokio::test]
async fn test_missing_body_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post(&fixtures::metric_path("test")).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
}

/// Invalid JSON returns VALID_001
#[tokio::test]
async fn test_invalid_json_returns_400() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(&fixtures::metric_path("test"))
        .content_type("application/json")
        .text("{\"value\":")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// An empty key segment returns KEY_001
#[tokio::test]
async fn test_empty_key_returns_412() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/metric//sum").await;
    response.assert_status(StatusCode::PRECONDITION_FAILED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "KEY_001");

    // No route matches a missing final segment
    let response = server
        .post("/metric/")
        .json(&fixtures::activity(1))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    assert!(ctx.registry.is_empty());
}

/// A key that is not valid UTF-8 is rejected like an empty one
#[tokio::test]
async fn test_undecodable_key_returns_412() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/metric/%FF")
        .json(&fixtures::activity(1))
        .await;
    response.assert_status(StatusCode::PRECONDITION_FAILED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "KEY_001");

    assert!(ctx.registry.is_empty());
}

/// Wrong method on the summary route
#[tokio::test]
async fn test_post_to_sum_route_not_allowed() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(&fixtures::sum_path("test"))
        .json(&fixtures::activity(1))
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
