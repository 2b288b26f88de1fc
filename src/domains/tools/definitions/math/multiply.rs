//! Multiplication tool definition.
//!
//! A tool that multiplies two numbers.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use tracing::{info, instrument};

use super::operands::{ArithmeticParams, ArithmeticResult, arithmetic_result};
use crate::domains::tools::definitions::common::parse_params;

// ============================================================================
// Tool Definition
// ============================================================================

/// Multiply tool - returns `a * b`.
pub struct MultiplyTool;

impl MultiplyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "multiply";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Multiply two numbers and return the product.";

    /// The operation itself.
    pub fn multiply(a: f64, b: f64) -> f64 {
        a * b
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(a = params.a, b = params.b))]
    pub fn execute(params: &ArithmeticParams) -> CallToolResult {
        info!("Multiply tool called");
        arithmetic_result(Self::NAME, params, Self::multiply(params.a, params.b))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ArithmeticParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ArithmeticResult>().into()),
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
                let params: ArithmeticParams = parse_params(args).map_err(McpError::from)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
