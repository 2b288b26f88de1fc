//! Tool server implementation and lifecycle management.
//!
//! This module contains the server handler that implements the MCP tools
//! protocol for one [`ToolSet`]. Tools are defined in
//! `domains/tools/definitions/` with one file per tool; the router for a set
//! is built in `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::config::Config;
use super::logging::init_logging;
use super::transport::StdioTransport;
use crate::domains::tools::{ToolSet, build_tool_router};

/// The MCP tool server handler.
///
/// Answers `tools/list` from the tool set's catalog and dispatches
/// `tools/call` through the tool router. Requests are handled one at a time
/// in arrival order by the stdio transport.
#[derive(Clone)]
pub struct ToolServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Which tools this server exposes.
    tool_set: ToolSet,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl ToolServer {
    /// Create a new tool server for the given tool set.
    pub fn new(config: Config, tool_set: ToolSet) -> Self {
        Self {
            config: Arc::new(config),
            tool_set,
            tool_router: build_tool_router::<Self>(tool_set),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool set served.
    pub fn tool_set(&self) -> ToolSet {
        self.tool_set
    }
}

impl ServerHandler for ToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.tool_set.instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_set.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!("Calling tool");
        let name = request.name.clone();
        let result = self
            .tool_router
            .call(ToolCallContext::new(self, request, context))
            .await;

        // A failed call is answered and the server keeps listening.
        if let Err(e) = &result {
            warn!("Tool call '{}' failed: {}", name, e.message);
        }
        result
    }
}

/// Run a tool server for `tool_set` over stdio until the client disconnects.
///
/// This is the whole body of the server binaries: load configuration, set up
/// logging, serve. Transport failures are logged here and returned so the
/// process exits nonzero.
pub async fn run_tool_server(tool_set: ToolSet) -> anyhow::Result<()> {
    let config = Config::from_env()?.with_server_name(tool_set.server_name());

    init_logging(&config.logging);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = ToolServer::new(config, tool_set);

    if let Err(e) = StdioTransport::run(server).await {
        error!("{} server error: {}", tool_set.server_name(), e);
        return Err(e.into());
    }

    info!("Server shutting down");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::ServiceExt;
    use serde_json::json;

    fn call_params(name: &str, arguments: serde_json::Value) -> CallToolRequestParam {
        serde_json::from_value(json!({ "name": name, "arguments": arguments })).unwrap()
    }

    /// Serve `tool_set` over an in-memory pipe and connect a bare client.
    async fn connect(tool_set: ToolSet) -> rmcp::service::RunningService<rmcp::RoleClient, ()> {
        let (server_io, client_io) = tokio::io::duplex(64 * 1024);
        let config = Config::default().with_server_name(tool_set.server_name());
        let server = ToolServer::new(config, tool_set);

        tokio::spawn(async move {
            if let Ok(running) = server.serve(server_io).await {
                let _ = running.waiting().await;
            }
        });

        ().serve(client_io).await.unwrap()
    }

    #[test]
    fn test_server_info() {
        let server = ToolServer::new(Config::default().with_server_name("Math"), ToolSet::Math);
        let info = server.get_info();
        assert_eq!(info.server_info.name, "Math");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("add"));
    }

    #[tokio::test]
    async fn test_list_tools_returns_registered_tools() {
        let client = connect(ToolSet::Math).await;

        let tools = client.list_all_tools().await.unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["add", "multiply"]);

        client.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_call_tool_roundtrip() {
        let client = connect(ToolSet::Math).await;

        let result = client
            .call_tool(call_params("add", json!({ "a": 3, "b": 5 })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"].as_f64(), Some(8.0));

        client.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_tool_keeps_server_alive() {
        let client = connect(ToolSet::Weather).await;

        let err = client
            .call_tool(call_params("add", json!({ "a": 1, "b": 2 })))
            .await;
        assert!(err.is_err());

        // The server still answers after the failed call.
        let result = client
            .call_tool(call_params("get_weather", json!({ "location": "Lahore Pakistan" })))
            .await
            .unwrap();
        assert_eq!(result.structured_content.unwrap()["location"], "Lahore Pakistan");

        client.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_reported() {
        let client = connect(ToolSet::Math).await;

        let err = client
            .call_tool(call_params("multiply", json!({ "a": "eight" })))
            .await;
        match err {
            Err(rmcp::ServiceError::McpError(data)) => {
                assert!(data.message.contains("Invalid arguments"));
            }
            other => panic!("expected an MCP error response, got {other:?}"),
        }

        client.cancel().await.unwrap();
    }
}
