//! Common test setup functions.

use api::{router, state::AppState};
use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use telemetry::health;
use tokio::task::JoinHandle;
use tracker_core::{ActivityRegistry, WindowConfig};
use worker::{WorkerConfig, WorkerScheduler};

/// Test context around the real router.
///
/// Each context owns its own registry, so tests never observe each other's
/// keys.
pub struct TestContext {
    pub registry: Arc<ActivityRegistry>,
    pub window: WindowConfig,
    pub router: Router,
}

impl TestContext {
    /// Context with the production window (1h TTL, 1m sweep).
    pub fn new() -> Self {
        Self::with_window(WindowConfig::default())
    }

    /// Context whose events expire after `ttl`, swept every `sweep_interval`.
    pub fn with_ttl(ttl: Duration, sweep_interval: Duration) -> Self {
        Self::with_window(WindowConfig::new(ttl, sweep_interval))
    }

    pub fn with_window(window: WindowConfig) -> Self {
        let registry = Arc::new(ActivityRegistry::new());
        health().registry.set_healthy();

        let state = AppState::new(registry.clone(), window.clone());
        let router = router(state);

        Self {
            registry,
            window,
            router,
        }
    }

    /// Test server over the context's router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }

    /// Start the background sweep for this context's registry.
    pub fn start_workers(&self) -> Vec<JoinHandle<()>> {
        let config = WorkerConfig::new(&self.window, Duration::from_secs(60));
        Arc::new(WorkerScheduler::new(config, self.registry.clone())).start()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
