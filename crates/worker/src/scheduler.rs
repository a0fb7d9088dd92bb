//! Worker scheduler for background tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use telemetry::{health, metrics};
use tracker_core::{ActivityRegistry, WindowConfig};

use crate::sweeper::SweepWorker;

/// Worker scheduler configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Sweep interval
    pub sweep_interval: Duration,
    /// Metrics report interval
    pub metrics_log_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            sweep_interval: WindowConfig::default().sweep_interval,
            metrics_log_interval: Duration::from_secs(60), // 1 minute
        }
    }
}

impl WorkerConfig {
    pub fn new(window: &WindowConfig, metrics_log_interval: Duration) -> Self {
        Self {
            sweep_interval: window.sweep_interval,
            metrics_log_interval,
        }
    }
}

/// Marks the sweeper unhealthy when the sweep task ends, whether it panicked
/// or was aborted.
struct SweeperLiveness;

impl Drop for SweeperLiveness {
    fn drop(&mut self) {
        warn!("Sweep worker stopped");
        health().sweeper.set_unhealthy("sweep task stopped");
    }
}

/// Background worker scheduler.
pub struct WorkerScheduler {
    config: WorkerConfig,
    registry: Arc<ActivityRegistry>,
}

impl WorkerScheduler {
    pub fn new(config: WorkerConfig, registry: Arc<ActivityRegistry>) -> Self {
        Self { config, registry }
    }

    /// Starts all background workers.
    pub fn start(self: Arc<Self>) -> Vec<tokio::task::JoinHandle<()>> {
        let mut handles = Vec::new();

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_sweep_worker().await;
        }));
        health().sweeper.set_healthy();

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_metrics_report().await;
        }));

        info!(
            sweep_interval = ?self.config.sweep_interval,
            metrics_log_interval = ?self.config.metrics_log_interval,
            "Background workers started"
        );
        handles
    }

    async fn run_sweep_worker(&self) {
        let _liveness = SweeperLiveness;
        let worker = SweepWorker::new(self.registry.clone());
        let mut ticker = interval(self.config.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            worker.run();
        }
    }

    async fn run_metrics_report(&self) {
        let mut ticker = interval(self.config.metrics_log_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let snapshot = metrics().snapshot();
            info!(
                events_recorded = snapshot.events_recorded,
                summaries_served = snapshot.summaries_served,
                events_expired = snapshot.events_expired,
                tracked_keys = snapshot.tracked_keys,
                live_events = snapshot.live_events,
                record_latency_mean_us = snapshot.record_latency_mean_us,
                summary_latency_mean_us = snapshot.summary_latency_mean_us,
                "Activity metrics"
            );
        }
    }
}
