//! Operand and result types shared by the arithmetic tools.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::tools::definitions::common::{error_result, format_number, structured_result};

/// Parameters for a binary arithmetic operation.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct ArithmeticParams {
    /// Left operand.
    #[schemars(description = "First number")]
    pub a: f64,

    /// Right operand.
    #[schemars(description = "Second number")]
    pub b: f64,
}

/// Structured output of an arithmetic tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ArithmeticResult {
    /// The computed value.
    pub result: f64,
}

/// Wrap a computed value into a tool result.
///
/// JSON cannot carry infinities or NaN, so an overflowing result is a
/// failed invocation rather than a silently null value.
pub fn arithmetic_result(operation: &str, params: &ArithmeticParams, value: f64) -> CallToolResult {
    if !value.is_finite() {
        return error_result(&format!(
            "Execution failed: {}({}, {}) does not produce a finite number",
            operation, params.a, params.b
        ));
    }

    structured_result(format_number(value), &ArithmeticResult { result: value })
}
