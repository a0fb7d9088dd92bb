//! Windowed counter for a single activity key.
//!
//! Events are kept ordered by expiry so that pruning only ever touches the
//! front of the map. A running total is adjusted on every insert and removal,
//! which makes a sum query cost proportional to the number of events that
//! expired since the last access rather than the number held.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// Longest TTL an event can carry. Longer TTLs are clamped to it so that
/// `recorded_at + ttl` stays representable.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A single recorded value with its own expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub value: i64,
    pub recorded_at: Instant,
    pub expires_at: Instant,
}

impl Event {
    pub fn new(value: i64, recorded_at: Instant, ttl: Duration) -> Self {
        Self {
            value,
            recorded_at,
            expires_at: recorded_at + ttl.min(MAX_TTL),
        }
    }

    /// An event stops counting at the instant it expires.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Default)]
struct Window {
    /// Keyed by (expires_at, seq); seq only disambiguates equal expiries.
    events: BTreeMap<(Instant, u64), Event>,
    /// Wrapping sum of every held event's value.
    total: i64,
    next_seq: u64,
}

impl Window {
    fn insert(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.total = self.total.wrapping_add(event.value);
        self.events.insert((event.expires_at, seq), event);
    }

    fn prune(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while let Some(entry) = self.events.first_entry() {
            if !entry.get().is_expired(now) {
                break;
            }
            let event = entry.remove();
            self.total = self.total.wrapping_sub(event.value);
            removed += 1;
        }
        removed
    }
}

/// Sum of recent events for one activity key.
///
/// All methods take `&self`; the event window sits behind a mutex that is
/// only held for in-memory work.
#[derive(Debug, Default)]
pub struct WindowedCounter {
    window: Mutex<Window>,
}

impl WindowedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value`, counted until `ttl` has elapsed.
    pub fn add(&self, value: i64, ttl: Duration) {
        self.add_at(value, ttl, Instant::now());
    }

    /// Records `value` as if observed at `now`.
    pub fn add_at(&self, value: i64, ttl: Duration, now: Instant) {
        self.window.lock().insert(Event::new(value, now, ttl));
    }

    /// Current sum of events that have not yet expired.
    pub fn sum(&self) -> i64 {
        self.sum_at(Instant::now())
    }

    /// Sum of events still live at `now`.
    ///
    /// Expired events are dropped on the way, so the returned value never
    /// includes one.
    pub fn sum_at(&self, now: Instant) -> i64 {
        let mut window = self.window.lock();
        window.prune(now);
        window.total
    }

    /// Physically removes events expired at `now`, returning how many went.
    pub fn prune_expired_at(&self, now: Instant) -> usize {
        self.window.lock().prune(now)
    }

    /// Number of events held, including expired ones not yet pruned.
    pub fn len(&self) -> usize {
        self.window.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
