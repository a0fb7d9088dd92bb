//! Test fixtures and request helpers.

use axum_test::TestServer;
use serde_json::Value;

/// Path for recording events under `key`.
pub fn metric_path(key: &str) -> String {
    format!("/metric/{}", key)
}

/// Path for summarizing `key`.
pub fn sum_path(key: &str) -> String {
    format!("/metric/{}/sum", key)
}

/// Record body for `value`.
pub fn activity(value: i64) -> Value {
    serde_json::json!({ "value": value })
}

/// POST a value and assert it was accepted with an empty object.
pub async fn record(server: &TestServer, key: &str, value: i64) {
    let response = server.post(&metric_path(key)).json(&activity(value)).await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!({}));
}

/// GET the current sum for `key`.
pub async fn sum(server: &TestServer, key: &str) -> i64 {
    let response = server.get(&sum_path(key)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["value"]
        .as_i64()
        .expect("summary should carry an integer value")
}
