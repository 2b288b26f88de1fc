//! Weather lookup tool definition.
//!
//! A stub that answers every location with the same forecast. The location
//! is echoed back verbatim and never validated, so any string (including
//! the empty string) is accepted.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{parse_params, structured_result};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWeatherParams {
    /// Free-form location, e.g. "Lahore Pakistan".
    #[schemars(description = "Location to get the weather for")]
    pub location: String,
}

// ============================================================================
// Output Structure
// ============================================================================

/// Weather report returned as structured content.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WeatherReport {
    /// The location exactly as requested.
    pub location: String,
    /// Human-readable forecast.
    pub forecast: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Weather tool - reports the (constant) weather for a location.
pub struct GetWeatherTool;

impl GetWeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the weather for a location.";

    /// Build the forecast text for a location.
    pub fn forecast(location: &str) -> String {
        format!("It's always raining in {}", location)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(location = %params.location))]
    pub fn execute(params: &GetWeatherParams) -> CallToolResult {
        info!("Weather tool called");

        let report = WeatherReport {
            location: params.location.clone(),
            forecast: Self::forecast(&params.location),
        };
        structured_result(report.forecast.clone(), &report)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<GetWeatherParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<WeatherReport>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the server's router.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            async move {
                let params: GetWeatherParams = parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_forecast_contains_location() {
        for location in ["Lahore Pakistan", "", "  ", "Zürich 🌧", "a\nb"] {
            let forecast = GetWeatherTool::forecast(location);
            assert!(forecast.contains(location));
        }
        assert_eq!(
            GetWeatherTool::forecast("Lahore Pakistan"),
            "It's always raining in Lahore Pakistan"
        );
    }

    #[test]
    fn test_execute_empty_location() {
        let params = GetWeatherParams {
            location: String::new(),
        };
        let result = GetWeatherTool::execute(&params);
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["location"], "");
    }

    #[test]
    fn test_execute_text_summary() {
        let params = GetWeatherParams {
            location: "Lahore Pakistan".to_string(),
        };
        let result = GetWeatherTool::execute(&params);

        let text = match &result.content[0].raw {
            RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        };
        assert!(text.contains("Lahore Pakistan"));
    }

    #[test]
    fn test_params_require_location() {
        let err = parse_params::<GetWeatherParams>(None).unwrap_err();
        assert!(err.to_string().contains("location"));
    }
}
