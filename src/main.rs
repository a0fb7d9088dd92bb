//! Activity Tracker
//!
//! Records numeric events per activity key and reports the sum of the
//! events seen within a trailing time window:
//! - `POST /metric/{key}` with `{"value": <int>}`
//! - `GET /metric/{key}/sum` returning `{"value": <int>}`
//!
//! Events expire individually after the configured TTL; a background sweep
//! reclaims their memory.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, AppState};
use telemetry::{health, init_tracing_from_env};
use tracker_core::{ActivityRegistry, WindowConfig};
use worker::{WorkerConfig, WorkerScheduler};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Event TTL and sweep interval
    #[serde(default)]
    window: WindowConfig,

    /// How often the metrics snapshot is logged
    #[serde(with = "humantime_serde", default = "default_metrics_log_interval")]
    metrics_log_interval: Duration,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_metrics_log_interval() -> Duration {
    Duration::from_secs(60)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            window: WindowConfig::default(),
            metrics_log_interval: default_metrics_log_interval(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Activity Tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    config
        .window
        .validate()
        .context("Invalid window configuration")?;

    info!(
        ttl = %humantime::format_duration(config.window.ttl),
        sweep_interval = %humantime::format_duration(config.window.sweep_interval),
        "Loaded window config"
    );

    let registry = Arc::new(ActivityRegistry::new());
    health().registry.set_healthy();

    let worker_scheduler = Arc::new(WorkerScheduler::new(
        WorkerConfig::new(&config.window, config.metrics_log_interval),
        registry.clone(),
    ));
    let worker_handles = worker_scheduler.start();

    let state = AppState::new(registry, config.window.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");

    for handle in worker_handles {
        handle.abort();
    }
    health().sweeper.set_unhealthy("stopped");

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables (ACTIVITY__PORT, ACTIVITY__WINDOW__TTL, ...)
        .add_source(
            config::Environment::with_prefix("ACTIVITY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Variable names understood by earlier deployments
    if let Some(ttl) = env_duration("activityTTLDuration")? {
        config.window.ttl = ttl;
    }
    if let Some(interval) = env_duration("activityTTLCheckInterval")? {
        config.window.sweep_interval = interval;
    }

    Ok(config)
}

/// Reads a humantime duration ("2s", "1h") from the environment.
fn env_duration(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => humantime::parse_duration(raw.trim())
            .map(Some)
            .with_context(|| format!("Invalid duration in {}: {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
