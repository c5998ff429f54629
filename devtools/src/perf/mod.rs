//! Timing helpers for measuring host work such as scenario renders

pub mod tracker;

pub use tracker::{DurationTracker, time_async, time_sync, try_time_async, try_time_sync};
