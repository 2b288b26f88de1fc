//! Tool Client Registry - resolves and routes tools across servers.
//!
//! This module provides:
//! - Fail-fast launch of every configured server
//! - A flattened, immutable tool catalog annotated with the owning server
//! - The tool-name collision policy
//! - Call routing and teardown

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use super::config::{ServerLaunchConfig, ServersConfig};
use super::connection::ServerConnection;
use super::error::RegistryError;
use super::invocation::{InvocationOutcome, InvocationRequest};
use crate::core::config::{DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_STARTUP_TIMEOUT_SECS};

/// Separator between server and tool name under [`ToolNaming::Namespaced`].
pub const NAMESPACE_SEPARATOR: char = '.';

// ============================================================================
// Options
// ============================================================================

/// How tool names from different servers are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolNaming {
    /// Expose tools under their own names; a name offered by two servers
    /// fails resolution.
    #[default]
    Reject,
    /// Expose every tool as `<server>.<tool>`.
    Namespaced,
}

impl ToolNaming {
    /// The name a server's tool is exposed under.
    pub fn exposed_name(self, server: &str, tool: &str) -> String {
        match self {
            Self::Reject => tool.to_string(),
            Self::Namespaced => format!("{}{}{}", server, NAMESPACE_SEPARATOR, tool),
        }
    }
}

impl FromStr for ToolNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "namespaced" => Ok(Self::Namespaced),
            other => Err(format!(
                "unknown tool naming policy '{}' (expected 'reject' or 'namespaced')",
                other
            )),
        }
    }
}

impl fmt::Display for ToolNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Namespaced => write!(f, "namespaced"),
        }
    }
}

/// Registry timeouts and naming policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Budget for launch + handshake + tool listing, shared by the three
    /// steps, per server.
    pub startup_timeout: Duration,
    /// Budget for a single tool call.
    pub call_timeout: Duration,
    /// Collision policy.
    pub naming: ToolNaming,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            startup_timeout: Duration::from_secs(DEFAULT_STARTUP_TIMEOUT_SECS),
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            naming: ToolNaming::default(),
        }
    }
}

// ============================================================================
// Resolved tools
// ============================================================================

/// A tool as exposed by the registry.
#[derive(Debug, Clone)]
pub struct ResolvedTool {
    /// Name the orchestrator calls the tool by.
    pub name: String,

    /// Registry name of the owning server.
    pub server: String,

    /// Tool metadata as listed by the server.
    pub definition: Tool,

    /// Index of the owning connection.
    connection: usize,
}

impl ResolvedTool {
    /// The name the owning server knows the tool by.
    pub fn remote_name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> Option<&str> {
        self.definition.description.as_deref()
    }
}

/// Flatten per-server catalogs into one list plus a name index.
///
/// `catalogs[i]` belongs to connection `i`.
fn merge_catalogs(
    catalogs: Vec<(String, Vec<Tool>)>,
    naming: ToolNaming,
) -> Result<(Vec<ResolvedTool>, HashMap<String, usize>), RegistryError> {
    let mut tools: Vec<ResolvedTool> = Vec::new();
    let mut index = HashMap::new();

    for (connection, (server, definitions)) in catalogs.into_iter().enumerate() {
        for definition in definitions {
            let name = naming.exposed_name(&server, &definition.name);
            if let Some(&existing) = index.get(&name) {
                let first: &ResolvedTool = &tools[existing];
                return Err(RegistryError::DuplicateTool {
                    tool: name,
                    first: first.server.clone(),
                    second: server,
                });
            }
            index.insert(name.clone(), tools.len());
            tools.push(ResolvedTool {
                name,
                server: server.clone(),
                definition,
                connection,
            });
        }
    }

    Ok((tools, index))
}

// ============================================================================
// Registry
// ============================================================================

/// Tool client registry - owns one connection per configured server.
///
/// The tool catalog is fixed at [`connect`](Self::connect) time. Call
/// [`shutdown`](Self::shutdown) to tear down; dropping the registry also
/// kills every child process.
pub struct ToolClientRegistry {
    connections: Vec<ServerConnection>,
    tools: Vec<ResolvedTool>,
    index: HashMap<String, usize>,
    options: RegistryOptions,
}

impl ToolClientRegistry {
    /// Launch every server, list its tools and build the merged catalog.
    ///
    /// Servers are started one at a time in name order. The first failure
    /// shuts down everything launched so far and is returned.
    #[instrument(skip_all, fields(servers = servers.len()))]
    pub async fn connect(
        servers: &ServersConfig,
        options: RegistryOptions,
    ) -> Result<Self, RegistryError> {
        let mut connections = Vec::with_capacity(servers.len());
        let mut catalogs = Vec::with_capacity(servers.len());

        for (name, launch) in servers.iter() {
            match Self::open(name, launch, &options).await {
                Ok((connection, tools)) => {
                    info!("Server '{}' offers {} tool(s)", name, tools.len());
                    catalogs.push((name.to_string(), tools));
                    connections.push(connection);
                }
                Err(e) => {
                    error!("Resolution failed at server '{}': {}", name, e);
                    shutdown_all(connections).await;
                    return Err(e);
                }
            }
        }

        let (tools, index) = match merge_catalogs(catalogs, options.naming) {
            Ok(merged) => merged,
            Err(e) => {
                error!("Resolution failed: {}", e);
                shutdown_all(connections).await;
                return Err(e);
            }
        };

        info!(
            "Resolved {} tool(s) from {} server(s)",
            tools.len(),
            connections.len()
        );

        Ok(Self {
            connections,
            tools,
            index,
            options,
        })
    }

    async fn open(
        name: &str,
        launch: &ServerLaunchConfig,
        options: &RegistryOptions,
    ) -> Result<(ServerConnection, Vec<Tool>), RegistryError> {
        let started = Instant::now();
        let connection = ServerConnection::launch(name, launch, options.startup_timeout).await?;
        let remaining = remaining_budget(started, options.startup_timeout);
        match connection.list_tools(remaining).await {
            Ok(tools) => Ok((connection, tools)),
            Err(e) => {
                connection.shutdown().await;
                Err(e)
            }
        }
    }

    /// All resolved tools, by server name then server-declared order.
    pub fn tools(&self) -> &[ResolvedTool] {
        &self.tools
    }

    /// Look up a tool by exposed name.
    pub fn tool(&self, name: &str) -> Option<&ResolvedTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Look up a tool by owning server and the server's own tool name,
    /// independent of the naming policy.
    pub fn find(&self, server: &str, remote_name: &str) -> Option<&ResolvedTool> {
        self.tools
            .iter()
            .find(|tool| tool.server == server && tool.remote_name() == remote_name)
    }

    /// Registry names of the connected servers.
    pub fn server_names(&self) -> Vec<&str> {
        self.connections.iter().map(|c| c.name()).collect()
    }

    /// OS process ids of the launched servers.
    pub fn process_ids(&self) -> Vec<u32> {
        self.connections.iter().filter_map(|c| c.pid()).collect()
    }

    /// Number of resolved tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Route a call to the server that owns the tool.
    pub async fn call(&self, request: InvocationRequest) -> Result<InvocationOutcome, RegistryError> {
        self.call_with_timeout(request, self.options.call_timeout).await
    }

    /// Route a call with its own time limit instead of the configured one.
    ///
    /// A timed-out call leaves the server available.
    #[instrument(skip(self, request), fields(tool = %request.tool))]
    pub async fn call_with_timeout(
        &self,
        request: InvocationRequest,
        limit: Duration,
    ) -> Result<InvocationOutcome, RegistryError> {
        let tool = self
            .tool(&request.tool)
            .ok_or_else(|| RegistryError::unknown_tool(&request.tool))?;
        let connection = &self.connections[tool.connection];

        debug!("Routing to server '{}'", tool.server);
        let outcome = connection
            .call_tool(tool.remote_name(), request.arguments, limit)
            .await?;

        if let InvocationOutcome::Failure(message) = &outcome {
            info!("Tool '{}' reported a failure: {}", request.tool, message);
        }
        Ok(outcome)
    }

    /// Call a tool with JSON arguments (an object, or null for none).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<InvocationOutcome, RegistryError> {
        self.call(InvocationRequest::from_value(name, arguments)?).await
    }

    /// Close every session and terminate every server process.
    pub async fn shutdown(self) {
        info!("Shutting down {} server(s)", self.connections.len());
        shutdown_all(self.connections).await;
    }
}

/// What is left of `budget` since `started`.
fn remaining_budget(started: Instant, budget: Duration) -> Duration {
    budget.saturating_sub(started.elapsed())
}

async fn shutdown_all(connections: Vec<ServerConnection>) {
    for connection in connections {
        connection.shutdown().await;
    }
}
