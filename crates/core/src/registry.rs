//! Activity registry: one windowed counter per key.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::counter::WindowedCounter;

/// Outcome of a sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub keys_scanned: usize,
    pub events_expired: usize,
    pub live_events: usize,
}

/// Maps activity keys to their counters.
///
/// Keys are never removed; only the events inside each counter expire.
/// Neither the number of keys nor the events per key is bounded.
#[derive(Debug, Default)]
pub struct ActivityRegistry {
    counters: RwLock<HashMap<String, Arc<WindowedCounter>>>,
}

impl ActivityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counter for `key`, creating it on first use.
    ///
    /// Concurrent first use of the same key always resolves to a single
    /// shared counter.
    pub fn get_or_create(&self, key: &str) -> Arc<WindowedCounter> {
        if let Some(counter) = self.counters.read().get(key) {
            return counter.clone();
        }

        self.counters
            .write()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(WindowedCounter::new()))
            .clone()
    }

    /// Returns the counter for `key` if it was ever created.
    pub fn get(&self, key: &str) -> Option<Arc<WindowedCounter>> {
        self.counters.read().get(key).cloned()
    }

    /// Records `value` under `key`.
    pub fn record(&self, key: &str, value: i64, ttl: Duration) {
        self.get_or_create(key).add(value, ttl);
    }

    /// Current sum for `key`, zero when the key was never written.
    pub fn summarize(&self, key: &str) -> i64 {
        self.get(key).map_or(0, |counter| counter.sum())
    }

    /// Removes expired events from every counter.
    ///
    /// The map lock is only held while the counters are collected; each
    /// counter is then pruned under its own lock.
    pub fn sweep_at(&self, now: Instant) -> SweepReport {
        let counters: Vec<Arc<WindowedCounter>> = self.counters.read().values().cloned().collect();

        let mut report = SweepReport {
            keys_scanned: counters.len(),
            ..SweepReport::default()
        };

        for counter in counters {
            report.events_expired += counter.prune_expired_at(now);
            report.live_events += counter.len();
        }

        report
    }

    /// Number of keys tracked.
    pub fn len(&self) -> usize {
        self.counters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.read().is_empty()
    }
}
