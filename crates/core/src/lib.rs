//! Core store for the activity tracker: windowed per-key counters and the
//! registry that owns them.

pub mod config;
pub mod counter;
pub mod error;
pub mod metric;
pub mod registry;

pub use config::WindowConfig;
pub use counter::{Event, WindowedCounter, MAX_TTL};
pub use error::{Error, Result, ValidationErrorCode};
pub use metric::ActivityMetric;
pub use registry::{ActivityRegistry, SweepReport};
