//! Time window configuration shared by every counter.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::counter::MAX_TTL;
use crate::error::{Error, Result};

/// Time window settings.
///
/// Both values are fixed at startup; every event in the process shares the
/// same TTL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// How long a recorded event contributes to sums
    #[serde(with = "humantime_serde", default = "default_ttl")]
    pub ttl: Duration,

    /// How often the background sweep reclaims expired events
    #[serde(with = "humantime_serde", default = "default_sweep_interval")]
    pub sweep_interval: Duration,
}

fn default_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(60)
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl WindowConfig {
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            ttl,
            sweep_interval,
        }
    }

    /// Reject zero durations; a zero TTL would drop every event on arrival
    /// and a zero interval cannot drive a ticker. TTLs above `MAX_TTL` are
    /// rejected rather than silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(Error::config("window ttl must be greater than zero"));
        }
        if self.ttl > MAX_TTL {
            return Err(Error::config(format!(
                "window ttl must not exceed {}",
                humantime::format_duration(MAX_TTL)
            )));
        }
        if self.sweep_interval.is_zero() {
            return Err(Error::config(
                "window sweep_interval must be greater than zero",
            ));
        }
        Ok(())
    }
}
