//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use tracker_core::{ActivityRegistry, WindowConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Per-key windowed counters
    pub registry: Arc<ActivityRegistry>,
    /// Window settings; every recorded event uses `window.ttl`
    pub window: WindowConfig,
}

impl AppState {
    pub fn new(registry: Arc<ActivityRegistry>, window: WindowConfig) -> Self {
        Self { registry, window }
    }

    /// State with a fresh registry and the given event TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        let window = WindowConfig {
            ttl,
            ..WindowConfig::default()
        };
        Self::new(Arc::new(ActivityRegistry::new()), window)
    }

    pub fn ttl(&self) -> Duration {
        self.window.ttl
    }
}
