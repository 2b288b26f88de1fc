//! Common utilities shared across tool definitions.
//!
//! Argument parsing and the response helpers every tool uses to build its
//! `CallToolResult`.

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Deserialize the raw call arguments into a tool's parameter struct.
///
/// Missing arguments are treated as an empty object so that tools without
/// required parameters accept a bare call.
pub fn parse_params<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, ToolError> {
    let args = arguments.unwrap_or_default();
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a result carrying a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("Failed to serialize result: {}", e)),
    }
}

/// Render a number the way a person would write it (`8`, not `8.0`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
