//! A live connection to one tool server process.

use rmcp::{
    RoleClient, ServiceError, ServiceExt,
    model::{CallToolRequestParam, JsonObject, Tool},
    service::RunningService,
    transport::TokioChildProcess,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::config::{ServerLaunchConfig, TransportKind};
use super::error::RegistryError;
use super::invocation::InvocationOutcome;

/// A running child process plus the MCP client session on its pipes.
///
/// Dropping the connection cancels the session and kills the child.
/// [`ServerConnection::shutdown`] does the same but waits for the session
/// task to finish.
pub struct ServerConnection {
    name: String,
    pid: Option<u32>,
    service: RunningService<RoleClient, ()>,
    available: AtomicBool,
}

impl ServerConnection {
    /// Spawn the server process and complete the MCP handshake.
    #[instrument(skip(launch), fields(command = %launch.command))]
    pub async fn launch(
        name: &str,
        launch: &ServerLaunchConfig,
        startup_timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let transport = match launch.transport {
            TransportKind::Stdio => TokioChildProcess::new(launch.to_command())
                .map_err(|source| RegistryError::launch(name, source))?,
        };
        let pid = transport.id();
        debug!(?pid, "Spawned server process");

        // On timeout the pending handshake (and with it the child) is dropped.
        let service = timeout(startup_timeout, ().serve(transport))
            .await
            .map_err(|_| RegistryError::timeout(name, "complete the handshake", startup_timeout))?
            .map_err(|e| RegistryError::handshake(name, e.to_string()))?;

        match service.peer_info() {
            Some(info) => info!(
                "Connected to '{}' ({} v{})",
                name, info.server_info.name, info.server_info.version
            ),
            None => info!("Connected to '{}'", name),
        }

        Ok(Self {
            name: name.to_string(),
            pid,
            service,
            available: AtomicBool::new(true),
        })
    }

    /// Registry name of the server.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// OS process id of the child, if it was known at spawn time.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// False once the channel has broken.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Fetch the server's full tool list.
    pub async fn list_tools(&self, limit: Duration) -> Result<Vec<Tool>, RegistryError> {
        self.ensure_available()?;

        match timeout(limit, self.service.list_all_tools()).await {
            Err(_) => Err(RegistryError::timeout(&self.name, "list its tools", limit)),
            Ok(Ok(tools)) => Ok(tools),
            Ok(Err(ServiceError::McpError(error))) => {
                Err(RegistryError::list_tools(&self.name, error.message))
            }
            Ok(Err(other)) => Err(self.transport_failure(other)),
        }
    }

    /// Call a tool by the name the server knows it by.
    ///
    /// Error responses from the server (unknown tool, invalid arguments) are
    /// returned as [`InvocationOutcome::Failure`]; only a broken channel or a
    /// timeout is an `Err`.
    pub async fn call_tool(
        &self,
        tool: &str,
        arguments: Option<JsonObject>,
        limit: Duration,
    ) -> Result<InvocationOutcome, RegistryError> {
        self.ensure_available()?;

        let params: CallToolRequestParam =
            serde_json::from_value(serde_json::json!({ "name": tool, "arguments": arguments }))
                .map_err(|e| RegistryError::invalid_arguments(tool, e.to_string()))?;

        match timeout(limit, self.service.call_tool(params)).await {
            Err(_) => Err(RegistryError::timeout(&self.name, "answer a tool call", limit)),
            Ok(Ok(result)) => Ok(InvocationOutcome::from(result)),
            Ok(Err(ServiceError::McpError(error))) => {
                debug!("Server '{}' rejected '{}': {}", self.name, tool, error.message);
                Ok(InvocationOutcome::Failure(error.message.into_owned()))
            }
            Ok(Err(other)) => Err(self.transport_failure(other)),
        }
    }

    /// Close the session and terminate the child process.
    pub async fn shutdown(self) {
        let Self { name, service, .. } = self;
        match service.cancel().await {
            Ok(reason) => debug!("Connection to '{}' closed: {:?}", name, reason),
            Err(e) => warn!("Connection task for '{}' did not finish cleanly: {}", name, e),
        }
    }

    fn ensure_available(&self) -> Result<(), RegistryError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(RegistryError::ServerUnavailable(self.name.clone()))
        }
    }

    /// Mark the server unavailable for the rest of the session.
    fn transport_failure(&self, error: ServiceError) -> RegistryError {
        warn!("Transport to '{}' failed, marking unavailable: {}", self.name, error);
        self.available.store(false, Ordering::Release);
        RegistryError::transport(&self.name, error.to_string())
    }
}
