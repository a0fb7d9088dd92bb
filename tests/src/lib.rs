//! Shared setup for the activity tracker integration tests.

pub mod fixtures;
pub mod setup;
