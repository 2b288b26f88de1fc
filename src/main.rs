//! Tool Hub Entry Point
//!
//! Loads configuration, launches the configured tool servers, prints the
//! resolved tool catalog and runs the two demo requests against it. The
//! language-model agent that would normally choose these calls lives
//! outside this crate; the calls below are the ones it makes for "what is
//! 3 plus 5 and then multiply with 12?" and "what is the weather in Lahore
//! Pakistan?".

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::{info, warn};

use mcp_tool_hub::client::{InvocationOutcome, ToolClientRegistry};
use mcp_tool_hub::core::{AppContext, Config, init_logging};
use mcp_tool_hub::domains::tools::ToolSet;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let context = AppContext::initialize(config).await?;

    if context.config().credentials.model_api_key.is_none() {
        warn!("No model API key configured - running the scripted demo calls only");
    }

    for tool in context.registry().tools() {
        info!(
            "Tool '{}' from '{}': {}",
            tool.name,
            tool.server,
            tool.description().unwrap_or("")
        );
    }

    // Tear down on every path, including a failed demo.
    let result = run_demo(context.registry()).await;
    context.shutdown().await;
    result?;

    info!("Tool hub shutting down");

    Ok(())
}

async fn run_demo(registry: &ToolClientRegistry) -> Result<()> {
    let math = ToolSet::Math.server_name();
    let weather = ToolSet::Weather.server_name();

    if let (Some(add), Some(multiply)) = (registry.find(math, "add"), registry.find(math, "multiply")) {
        let sum = registry.call_tool(&add.name, json!({ "a": 3, "b": 5 })).await?;
        let sum = number_result(&sum).context("add")?;

        let product = registry
            .call_tool(&multiply.name, json!({ "a": sum, "b": 12 }))
            .await?;
        let product = number_result(&product).context("multiply")?;

        println!("\nMath response: (3 + 5) * 12 = {}", product);
    } else {
        warn!("No '{}' server with add/multiply configured, skipping math demo", math);
    }

    if let Some(get_weather) = registry.find(weather, "get_weather") {
        let forecast = registry
            .call_tool(&get_weather.name, json!({ "location": "Lahore Pakistan" }))
            .await?;
        println!("\nWeather response: {}", forecast);
    } else {
        warn!("No '{}' server with get_weather configured, skipping weather demo", weather);
    }

    Ok(())
}

/// Extract the number from an arithmetic tool's structured result.
fn number_result(outcome: &InvocationOutcome) -> Result<f64> {
    match outcome {
        InvocationOutcome::Failure(message) => bail!("tool failed: {}", message),
        InvocationOutcome::Success { .. } => outcome
            .structured()
            .and_then(|value| value["result"].as_f64())
            .context("result is missing a numeric 'result' field"),
    }
}
