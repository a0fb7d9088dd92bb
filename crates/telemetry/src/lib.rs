//! Telemetry for the activity tracker.
//!
//! Structured logging through `tracing`, lock-free in-process metrics and a
//! health registry that backs the probe endpoints.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
