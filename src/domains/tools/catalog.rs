//! Tool catalog - which tools each server exposes.
//!
//! A [`ToolSet`] is the single source of truth for a server's identity and
//! tool metadata. The router (`router.rs`) and the server's `list_tools`
//! both derive from it, so the advertised order is stable.

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};

use super::definitions::{AddTool, GetWeatherTool, MultiplyTool};

/// A named group of tools served by one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolSet {
    /// Arithmetic tools: `add`, `multiply`.
    Math,
    /// Weather stub: `get_weather`.
    Weather,
}

impl ToolSet {
    /// Every known tool set, in launch order.
    pub const ALL: [ToolSet; 2] = [ToolSet::Math, ToolSet::Weather];

    /// Server name reported in the handshake and used as the registry key.
    pub fn server_name(self) -> &'static str {
        match self {
            Self::Math => "Math",
            Self::Weather => "Weather",
        }
    }

    /// Name of the executable that serves this tool set.
    pub fn binary_name(self) -> &'static str {
        match self {
            Self::Math => "math-server",
            Self::Weather => "weather-server",
        }
    }

    /// Tool names in advertised order.
    pub fn tool_names(self) -> Vec<&'static str> {
        match self {
            Self::Math => vec![AddTool::NAME, MultiplyTool::NAME],
            Self::Weather => vec![GetWeatherTool::NAME],
        }
    }

    /// Tool metadata in advertised order.
    pub fn tools(self) -> Vec<Tool> {
        match self {
            Self::Math => vec![AddTool::to_tool(), MultiplyTool::to_tool()],
            Self::Weather => vec![GetWeatherTool::to_tool()],
        }
    }

    /// Instructions sent to clients during the handshake.
    pub fn instructions(self) -> String {
        format!(
            "{} tool server. Available tools: {}.",
            self.server_name(),
            self.tool_names().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_match_metadata() {
        for set in ToolSet::ALL {
            let names = set.tool_names();
            let tools = set.tools();
            assert_eq!(names.len(), tools.len());
            for (name, tool) in names.iter().zip(&tools) {
                assert_eq!(tool.name, *name);
            }
        }
    }

    #[test]
    fn test_tool_names_unique_within_set() {
        for set in ToolSet::ALL {
            let names = set.tool_names();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(unique.len(), names.len());
        }
    }

    #[test]
    fn test_math_set() {
        assert_eq!(ToolSet::Math.server_name(), "Math");
        assert_eq!(ToolSet::Math.tool_names(), vec!["add", "multiply"]);
        assert!(ToolSet::Math.instructions().contains("multiply"));
    }

    #[test]
    fn test_weather_set() {
        assert_eq!(ToolSet::Weather.binary_name(), "weather-server");
        assert_eq!(ToolSet::Weather.tool_names(), vec!["get_weather"]);
    }
}
