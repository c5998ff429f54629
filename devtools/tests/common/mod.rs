//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

#![allow(dead_code)]

use scenario_devtools::{DevToolPlugin, Scenario, UsageMetrics};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Props shape used by the integration fixtures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestProps {
    pub name: String,
    pub value: i64,
}

/// Two scenarios with distinct props and descriptions
pub fn create_test_scenarios() -> Vec<Scenario<TestProps>> {
    vec![
        Scenario::new(
            "scenario1",
            TestProps {
                name: "test1".to_string(),
                value: 1,
            },
        )
        .with_description("First test scenario"),
        Scenario::new(
            "scenario2",
            TestProps {
                name: "test2".to_string(),
                value: 2,
            },
        )
        .with_description("Second test scenario"),
    ]
}

/// Path to a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Event observed by a `RecordingPlugin`
#[derive(Debug, Clone, PartialEq)]
pub enum PluginEvent {
    Initialized,
    ScenarioChanged(String),
    MetricsUpdated(UsageMetrics),
}

/// Plugin that records every hook call into a shared log
pub struct RecordingPlugin {
    pub name: String,
    pub events: Rc<RefCell<Vec<PluginEvent>>>,
}

impl RecordingPlugin {
    pub fn new(name: &str) -> (Self, Rc<RefCell<Vec<PluginEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let plugin = Self {
            name: name.to_string(),
            events: Rc::clone(&events),
        };
        (plugin, events)
    }
}

impl<P> DevToolPlugin<P> for RecordingPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.events.borrow_mut().push(PluginEvent::Initialized);
    }

    fn on_scenario_change(&mut self, scenario: &Scenario<P>) {
        self.events
            .borrow_mut()
            .push(PluginEvent::ScenarioChanged(scenario.name.clone()));
    }

    fn on_metrics_update(&mut self, metrics: &UsageMetrics) {
        self.events
            .borrow_mut()
            .push(PluginEvent::MetricsUpdated(*metrics));
    }
}
