//! Scenario DevTools Library
//!
//! In-memory registry of named scenarios for developer tooling panels, plus
//! the timing helpers hosts use to report render durations back to it.

pub mod config;
pub mod perf;
pub mod plugin;
pub mod scenario;

// Re-export commonly used types
pub use perf::{DurationTracker, time_async, time_sync, try_time_async, try_time_sync};
pub use plugin::DevToolPlugin;
pub use scenario::{
    RegistryConfig, Scenario, ScenarioChangeCallback, ScenarioError, ScenarioRegistry,
    UsageMetrics,
};
