//! Sweep worker for expired events.
//!
//! Sum queries already ignore expired events, so this pass exists purely to
//! give memory back for keys that are written but rarely read.

use std::sync::Arc;
use std::time::Instant as StdInstant;
use tokio::time::Instant;
use tracing::{debug, info};

use telemetry::metrics;
use tracker_core::{ActivityRegistry, SweepReport};

/// Worker that prunes expired events across the registry.
pub struct SweepWorker {
    registry: Arc<ActivityRegistry>,
}

impl SweepWorker {
    pub fn new(registry: Arc<ActivityRegistry>) -> Self {
        Self { registry }
    }

    /// Run one sweep pass against the current clock.
    pub fn run(&self) -> SweepReport {
        self.run_at(Instant::now())
    }

    /// Run one sweep pass as if at `now`.
    pub fn run_at(&self, now: Instant) -> SweepReport {
        let start = StdInstant::now();
        let report = self.registry.sweep_at(now);
        let elapsed_us = start.elapsed().as_micros() as u64;

        let m = metrics();
        m.sweeps_completed.inc();
        m.events_expired.inc_by(report.events_expired as u64);
        m.tracked_keys.set(report.keys_scanned as u64);
        m.live_events.set(report.live_events as u64);
        m.sweep_duration_us.observe(elapsed_us);

        if report.events_expired > 0 {
            info!(
                keys_scanned = report.keys_scanned,
                events_expired = report.events_expired,
                live_events = report.live_events,
                duration_us = elapsed_us,
                "Expired events swept"
            );
        } else {
            debug!(
                keys_scanned = report.keys_scanned,
                live_events = report.live_events,
                "Sweep found nothing to expire"
            );
        }

        report
    }
}
