//! Activity metric endpoints.
//!
//! - `POST /metric/{key}` records `{"value": <int>}` under the key
//! - `GET /metric/{key}/sum` returns the sum of live events as `{"value": <int>}`

use axum::{body::Bytes, extract::State, Json};
use std::time::Instant;
use telemetry::metrics;
use tracing::{debug, warn};
use tracker_core::ActivityMetric;

use crate::extractors::ActivityKey;
use crate::response::{ApiError, RecordResponse};
use crate::state::AppState;

/// POST /metric/{key} - Record one activity event.
pub async fn record_handler(
    State(state): State<AppState>,
    key: ActivityKey,
    body: Bytes,
) -> Result<Json<RecordResponse>, ApiError> {
    let start = Instant::now();

    let activity = ActivityMetric::parse(&body).map_err(|e| {
        warn!(activity_key = %key.as_str(), error = %e, "Rejected activity payload");
        metrics().rejected_requests.inc();
        ApiError::from(e)
    })?;

    state
        .registry
        .record(key.as_str(), activity.value, state.ttl());

    metrics().events_recorded.inc();
    metrics()
        .record_latency_us
        .observe(start.elapsed().as_micros() as u64);

    debug!(
        activity_key = %key.as_str(),
        value = activity.value,
        "Activity recorded"
    );

    Ok(Json(RecordResponse::default()))
}

/// GET /metric/{key}/sum - Sum of activity within the window.
///
/// Unknown keys report zero without creating a counter.
pub async fn sum_handler(
    State(state): State<AppState>,
    key: ActivityKey,
) -> Json<ActivityMetric> {
    let start = Instant::now();

    let value = match state.registry.get(key.as_str()) {
        Some(counter) => {
            let value = counter.sum();
            debug!(activity_key = %key.as_str(), value, "Summed activity");
            value
        }
        None => {
            debug!(activity_key = %key.as_str(), "No activity recorded for key");
            metrics().summaries_unknown_key.inc();
            0
        }
    };

    metrics().summaries_served.inc();
    metrics()
        .summary_latency_us
        .observe(start.elapsed().as_micros() as u64);

    Json(ActivityMetric::new(value))
}
