//! Background workers for the activity tracker.
//!
//! - Sweep (reclaims expired events from every counter)
//! - Metrics report (periodic metrics snapshot in the logs)

pub mod scheduler;
pub mod sweeper;

pub use scheduler::*;
pub use sweeper::SweepWorker;
