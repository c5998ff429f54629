//! DevTools configuration
//!
//! Configuration is loaded from environment variables prefixed with `DEVTOOLS_`.

use std::env;
use std::path::PathBuf;

/// Host configuration for the scenario registry
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the scenario JSON document
    pub scenarios_file: PathBuf,
    /// Scenario to select at startup, overriding the document's own choice
    pub initial_scenario: Option<String>,
    /// Tracing filter directive
    pub log_filter: String,
    /// Number of simulated renders per run
    pub render_passes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scenarios_file: PathBuf::from("scenarios.json"),
            initial_scenario: None,
            log_filter: "info".to_string(),
            render_passes: 1,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("DEVTOOLS_SCENARIOS_FILE")
            && !path.is_empty()
        {
            config.scenarios_file = PathBuf::from(path);
        }
        if let Some(name) = lookup("DEVTOOLS_INITIAL_SCENARIO")
            && !name.is_empty()
        {
            config.initial_scenario = Some(name);
        }
        if let Some(filter) = lookup("DEVTOOLS_LOG")
            && !filter.is_empty()
        {
            config.log_filter = filter;
        }
        if let Some(val) = lookup("DEVTOOLS_RENDER_PASSES")
            && let Ok(passes) = val.parse()
        {
            config.render_passes = passes;
        }

        config
    }
}
