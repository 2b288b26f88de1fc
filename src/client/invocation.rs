//! Invocation request and outcome types.
//!
//! These are the calling convention the agent orchestrator sees: a tool name
//! with a JSON argument object in, and either a value or a failure message
//! out. The failure text is meant to be handed back to the model.

use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;
use std::fmt;

use super::error::RegistryError;

/// A tool call addressed by exposed tool name.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    /// Exposed tool name.
    pub tool: String,

    /// Named arguments; `None` sends no arguments.
    pub arguments: Option<JsonObject>,
}

impl InvocationRequest {
    /// Build a request from a JSON value, which must be an object or null.
    pub fn from_value(tool: impl Into<String>, arguments: Value) -> Result<Self, RegistryError> {
        let tool = tool.into();
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(RegistryError::invalid_arguments(
                    tool,
                    format!("expected a JSON object, got {}", other),
                ));
            }
        };
        Ok(Self { tool, arguments })
    }
}

/// Result of a tool call as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome {
    /// The tool ran.
    Success {
        /// Concatenated text content.
        text: String,
        /// Structured content, when the tool returns one.
        structured: Option<Value>,
    },

    /// The tool (or the server handling it) reported a failure.
    Failure(String),
}

impl InvocationOutcome {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Text of the result or of the failure.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text, .. } => text,
            Self::Failure(message) => message,
        }
    }

    /// Structured content of a successful call.
    pub fn structured(&self) -> Option<&Value> {
        match self {
            Self::Success { structured, .. } => structured.as_ref(),
            Self::Failure(_) => None,
        }
    }

    /// The value of a successful call: structured content if present,
    /// otherwise the text.
    pub fn into_result(self) -> Result<Value, String> {
        match self {
            Self::Success {
                structured: Some(value),
                ..
            } => Ok(value),
            Self::Success { text, .. } => Ok(Value::String(text)),
            Self::Failure(message) => Err(message),
        }
    }
}

impl From<CallToolResult> for InvocationOutcome {
    fn from(result: CallToolResult) -> Self {
        let text = result
            .content
            .iter()
            .filter_map(|content| match &content.raw {
                RawContent::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if result.is_error.unwrap_or(false) {
            Self::Failure(text)
        } else {
            Self::Success {
                text,
                structured: result.structured_content,
            }
        }
    }
}

impl fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { text, .. } => write!(f, "{}", text),
            Self::Failure(message) => write!(f, "error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;

    #[test]
    fn test_request_from_object() {
        let request = InvocationRequest::from_value("add", json!({ "a": 3, "b": 5 })).unwrap();
        assert_eq!(request.tool, "add");
        assert_eq!(request.arguments.unwrap()["b"], 5);
    }

    #[test]
    fn test_request_from_null() {
        let request = InvocationRequest::from_value("ping", Value::Null).unwrap();
        assert!(request.arguments.is_none());
    }

    #[test]
    fn test_request_rejects_non_object() {
        let err = InvocationRequest::from_value("add", json!([3, 5])).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidArguments { .. }));
    }

    #[test]
    fn test_outcome_from_success() {
        let result = CallToolResult {
            content: vec![Content::text("8")],
            structured_content: Some(json!({ "result": 8.0 })),
            is_error: Some(false),
            meta: None,
        };
        let outcome = InvocationOutcome::from(result);
        assert!(outcome.is_success());
        assert_eq!(outcome.text(), "8");
        assert_eq!(outcome.to_string(), "8");
        assert_eq!(outcome.into_result().unwrap()["result"], 8.0);
    }

    #[test]
    fn test_outcome_from_text_only() {
        let outcome = InvocationOutcome::from(CallToolResult::success(vec![
            Content::text("line one"),
            Content::text("line two"),
        ]));
        assert!(outcome.structured().is_none());
        assert_eq!(outcome.into_result(), Ok(Value::String("line one\nline two".into())));
    }

    #[test]
    fn test_outcome_from_error() {
        let outcome = InvocationOutcome::from(CallToolResult::error(vec![Content::text("boom")]));
        assert_eq!(outcome, InvocationOutcome::Failure("boom".to_string()));
        assert_eq!(outcome.to_string(), "error: boom");
    }
}
