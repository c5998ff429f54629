use crate::plugin::DevToolPlugin;
use crate::scenario::types::{
    RegistryConfig, Scenario, ScenarioChangeCallback, ScenarioError, UsageMetrics,
};
use indexmap::IndexMap;
use metrics::{counter, histogram};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Scenario registry: owns the registered scenarios, the current selection
/// and the usage metrics derived from selection changes.
///
/// Single-writer by construction: every mutation takes `&mut self`, and hooks
/// run synchronously inside the call that triggered them.
pub struct ScenarioRegistry<P> {
    /// Scenarios keyed by name, in first-registration order
    scenarios: IndexMap<String, Scenario<P>>,
    /// Index into `scenarios`; `None` only for an empty registry
    current: Option<usize>,
    metrics: UsageMetrics,
    on_scenario_change: Option<ScenarioChangeCallback<P>>,
    plugins: Vec<Box<dyn DevToolPlugin<P>>>,
}

impl<P> ScenarioRegistry<P> {
    /// Build a registry and make the initial selection.
    ///
    /// A name registered twice keeps its first position but the later
    /// scenario. The initial selection is `initial_scenario` when it names a
    /// registered scenario, otherwise the first scenario of the input. It
    /// counts as a selection change: it bumps `update_count` and fires the
    /// change callback.
    pub fn new(config: RegistryConfig<P>) -> Self {
        let RegistryConfig {
            scenarios,
            initial_scenario,
            on_scenario_change,
        } = config;

        let first = scenarios.first().map(|s| s.name.clone());

        let mut map = IndexMap::with_capacity(scenarios.len());
        for scenario in scenarios {
            map.insert(scenario.name.clone(), scenario);
        }

        let mut registry = Self {
            scenarios: map,
            current: None,
            metrics: UsageMetrics::initial(),
            on_scenario_change,
            plugins: Vec::new(),
        };

        let initial = match initial_scenario {
            Some(name) if registry.scenarios.contains_key(&name) => Some(name),
            Some(name) => {
                warn!(
                    "Initial scenario {} is not registered, falling back to first scenario",
                    name
                );
                first
            }
            None => first,
        };

        if let Some(name) = initial {
            registry.select(&name);
        }

        info!(
            "Scenario registry initialized with {} scenarios",
            registry.scenarios.len()
        );

        registry
    }

    /// Currently selected scenario, `None` only when nothing is registered
    pub fn current(&self) -> Option<&Scenario<P>> {
        self.current
            .and_then(|index| self.scenarios.get_index(index))
            .map(|(_, scenario)| scenario)
    }

    /// Select a scenario by name.
    ///
    /// Returns `false` and leaves selection and metrics untouched when the
    /// name is unknown. Reselecting the current scenario is not short-circuited:
    /// it still counts as an update and fires every hook again.
    pub fn select(&mut self, name: &str) -> bool {
        let Some(index) = self.scenarios.get_index_of(name) else {
            counter!("devtools_scenario_selection_misses_total").increment(1);
            debug!("Scenario {} not found, keeping current selection", name);
            return false;
        };

        self.current = Some(index);
        self.metrics = UsageMetrics {
            update_count: self.metrics.update_count + 1,
            last_updated: SystemTime::now(),
            ..self.metrics
        };
        counter!("devtools_scenario_selections_total").increment(1);

        let scenario = &self.scenarios[index];
        info!(
            "Selected scenario {} (update {})",
            scenario.name, self.metrics.update_count
        );

        if let Some(callback) = self.on_scenario_change.as_mut() {
            callback(scenario);
        }
        for plugin in self.plugins.iter_mut() {
            plugin.on_scenario_change(scenario);
        }
        self.notify_metrics();

        true
    }

    /// Look up a scenario by name
    pub fn get(&self, name: &str) -> Option<&Scenario<P>> {
        self.scenarios.get(name)
    }

    /// Look up a scenario by name, reporting a miss as an error
    pub fn require(&self, name: &str) -> Result<&Scenario<P>, ScenarioError> {
        self.get(name)
            .ok_or_else(|| ScenarioError::NotFound(name.to_string()))
    }

    /// Registered scenarios in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Scenario<P>> {
        self.scenarios.values()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Snapshot of the current usage metrics
    pub fn metrics(&self) -> UsageMetrics {
        self.metrics
    }

    /// Store a host-measured render duration.
    ///
    /// Only `render_time_ms` changes; this is not a selection update.
    pub fn record_render_time(&mut self, render_time_ms: f64) {
        self.metrics = UsageMetrics {
            render_time_ms,
            ..self.metrics
        };
        histogram!("devtools_render_time_ms").record(render_time_ms);
        debug!("Recorded render time {:.3}ms", render_time_ms);

        self.notify_metrics();
    }

    /// Attach a plugin and run its `initialize` hook.
    ///
    /// Plugins only observe changes made after registration.
    pub fn register_plugin(
        &mut self,
        mut plugin: Box<dyn DevToolPlugin<P>>,
    ) -> Result<(), ScenarioError> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(ScenarioError::DuplicatePlugin(plugin.name().to_string()));
        }

        plugin.initialize();
        info!("Registered devtool plugin {}", plugin.name());
        self.plugins.push(plugin);

        Ok(())
    }

    /// Names of registered plugins in registration order
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    fn notify_metrics(&mut self) {
        let metrics = self.metrics;
        for plugin in self.plugins.iter_mut() {
            plugin.on_metrics_update(&metrics);
        }
    }
}

impl<P: Clone> ScenarioRegistry<P> {
    /// Owned copies of every registered scenario, in registration order
    pub fn all(&self) -> Vec<Scenario<P>> {
        self.scenarios.values().cloned().collect()
    }
}
