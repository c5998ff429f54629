//! Plugin hooks for tooling panels that want to observe a registry

use crate::scenario::{Scenario, UsageMetrics};

/// Observer attached to a `ScenarioRegistry`.
///
/// Hooks run synchronously inside the registry call that triggered them, in
/// registration order.
pub trait DevToolPlugin<P> {
    /// Unique plugin name within one registry
    fn name(&self) -> &str;

    /// Called once when the plugin is registered
    fn initialize(&mut self) {}

    /// Called after every successful selection
    fn on_scenario_change(&mut self, _scenario: &Scenario<P>) {}

    /// Called whenever the registry replaces its metrics snapshot
    fn on_metrics_update(&mut self, _metrics: &UsageMetrics) {}
}
