//! In-process metrics.
//!
//! Everything here is a plain atomic; recording never takes a lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (last written value wins).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Latency accumulator in microseconds; reports count, sum and mean.
#[derive(Debug)]
pub struct Histogram {
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in microseconds.
    pub fn observe(&self, us: u64) {
        self.sum.fetch_add(us, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }
}

/// Collected metrics for the activity tracker.
#[derive(Debug, Default)]
pub struct Metrics {
    // Request metrics
    pub events_recorded: Counter,
    pub summaries_served: Counter,
    pub summaries_unknown_key: Counter,
    pub rejected_requests: Counter,

    // Sweep metrics
    pub events_expired: Counter,
    pub sweeps_completed: Counter,

    // Latency histograms
    pub record_latency_us: Histogram,
    pub summary_latency_us: Histogram,
    pub sweep_duration_us: Histogram,

    // Gauges, refreshed by each sweep
    pub tracked_keys: Gauge,
    pub live_events: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            events_recorded: self.events_recorded.get(),
            summaries_served: self.summaries_served.get(),
            summaries_unknown_key: self.summaries_unknown_key.get(),
            rejected_requests: self.rejected_requests.get(),
            events_expired: self.events_expired.get(),
            sweeps_completed: self.sweeps_completed.get(),
            record_latency_mean_us: self.record_latency_us.mean(),
            summary_latency_mean_us: self.summary_latency_us.mean(),
            sweep_duration_mean_us: self.sweep_duration_us.mean(),
            tracked_keys: self.tracked_keys.get(),
            live_events: self.live_events.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub events_recorded: u64,
    pub summaries_served: u64,
    pub summaries_unknown_key: u64,
    pub rejected_requests: u64,
    pub events_expired: u64,
    pub sweeps_completed: u64,
    pub record_latency_mean_us: f64,
    pub summary_latency_mean_us: f64,
    pub sweep_duration_mean_us: f64,
    pub tracked_keys: u64,
    pub live_events: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
