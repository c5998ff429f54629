//! Scenario data shapes and the error type shared by the registry

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

/// Errors surfaced by the `Result`-flavoured registry APIs.
///
/// Plain lookups (`select`, `get`) never produce these; they report misses
/// through `bool` / `Option` instead.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario not found: {0}")]
    NotFound(String),

    #[error("Plugin already registered: {0}")]
    DuplicatePlugin(String),

    #[error("Invalid scenario document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

/// A named, host-defined parameter bundle.
///
/// `props` is opaque to the registry: it is stored and handed back, never
/// inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario<P> {
    /// Unique key within a registry
    pub name: String,
    /// Host-defined parameters
    pub props: P,
    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl<P> Scenario<P> {
    pub fn new(name: impl Into<String>, props: P) -> Self {
        Self {
            name: name.into(),
            props,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Usage metrics snapshot.
///
/// The registry replaces its copy wholesale on every update, so a value
/// handed out by `ScenarioRegistry::metrics` never changes underneath the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Last host-reported render duration in milliseconds
    pub render_time_ms: f64,
    /// Number of successful selections, including the initial one
    pub update_count: u64,
    /// When the selection last changed (or when the registry was built)
    pub last_updated: SystemTime,
}

impl UsageMetrics {
    pub(crate) fn initial() -> Self {
        Self {
            render_time_ms: 0.0,
            update_count: 0,
            last_updated: SystemTime::now(),
        }
    }
}

/// Callback invoked synchronously on every successful selection
pub type ScenarioChangeCallback<P> = Box<dyn FnMut(&Scenario<P>)>;

/// Registry construction parameters, consumed once by `ScenarioRegistry::new`.
pub struct RegistryConfig<P> {
    pub scenarios: Vec<Scenario<P>>,
    pub initial_scenario: Option<String>,
    pub on_scenario_change: Option<ScenarioChangeCallback<P>>,
}

impl<P> RegistryConfig<P> {
    pub fn new(scenarios: Vec<Scenario<P>>) -> Self {
        Self {
            scenarios,
            initial_scenario: None,
            on_scenario_change: None,
        }
    }

    pub fn with_initial_scenario(mut self, name: impl Into<String>) -> Self {
        self.initial_scenario = Some(name.into());
        self
    }

    pub fn on_scenario_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Scenario<P>) + 'static,
    {
        self.on_scenario_change = Some(Box::new(callback));
        self
    }
}

impl<P: DeserializeOwned> RegistryConfig<P> {
    /// Parse a scenario document of the form
    /// `{ "scenarios": [...], "initial_scenario": "..." }`.
    pub fn from_json(document: &str) -> Result<Self, ScenarioError> {
        let doc: ScenarioDocument<P> = serde_json::from_str(document)?;
        Ok(Self {
            scenarios: doc.scenarios,
            initial_scenario: doc.initial_scenario,
            on_scenario_change: None,
        })
    }
}

impl<P: fmt::Debug> fmt::Debug for RegistryConfig<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("scenarios", &self.scenarios)
            .field("initial_scenario", &self.initial_scenario)
            .field("on_scenario_change", &self.on_scenario_change.is_some())
            .finish()
    }
}

/// On-disk form of a `RegistryConfig` (callbacks cannot be serialized)
#[derive(Debug, Deserialize)]
struct ScenarioDocument<P> {
    scenarios: Vec<Scenario<P>>,
    #[serde(default)]
    initial_scenario: Option<String>,
}
