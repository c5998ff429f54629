use anyhow::Context;
use scenario_devtools::config::Config;
use scenario_devtools::{
    DevToolPlugin, RegistryConfig, Scenario, ScenarioRegistry, UsageMetrics, time_sync,
    try_time_async,
};
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Mirrors registry activity into the log, the way a panel would mirror it on screen
struct LogPanel;

impl DevToolPlugin<Value> for LogPanel {
    fn name(&self) -> &str {
        "log-panel"
    }

    fn initialize(&mut self) {
        debug!("Log panel attached");
    }

    fn on_metrics_update(&mut self, metrics: &UsageMetrics) {
        debug!(
            "Metrics: updates={}, render_time={:.3}ms",
            metrics.update_count, metrics.render_time_ms
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Loaded configuration: scenarios_file={}, render_passes={}",
        config.scenarios_file.display(),
        config.render_passes
    );

    let path = config.scenarios_file.clone();
    let (document, load_time) = try_time_async(|| tokio::fs::read_to_string(&path))
        .await
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    info!("Read scenario document in {:?}", load_time);

    let mut registry_config = RegistryConfig::<Value>::from_json(&document)
        .with_context(|| format!("Failed to parse scenario file {}", path.display()))?;
    if let Some(name) = config.initial_scenario.clone() {
        registry_config = registry_config.with_initial_scenario(name);
    }
    let registry_config = registry_config.on_scenario_change(|scenario: &Scenario<Value>| {
        info!(
            "Now previewing {}{}",
            scenario.name,
            scenario
                .description
                .as_deref()
                .map(|d| format!(" ({d})"))
                .unwrap_or_default()
        );
    });

    let mut registry = ScenarioRegistry::new(registry_config);
    registry.register_plugin(Box::new(LogPanel))?;

    if let Some(name) = std::env::args().nth(1)
        && !registry.select(&name)
    {
        warn!("Unknown scenario {}, keeping current selection", name);
    }

    for _ in 0..config.render_passes {
        let Some(current) = registry.current() else {
            warn!("No scenarios registered, nothing to render");
            break;
        };
        let (rendered, duration) = time_sync(|| serde_json::to_string_pretty(&current.props));
        let rendered = rendered.context("Failed to render scenario props")?;
        debug!("Rendered {} bytes", rendered.len());
        registry.record_render_time(duration.as_secs_f64() * 1000.0);
    }

    println!("{}", serde_json::to_string_pretty(&registry.metrics())?);

    Ok(())
}
