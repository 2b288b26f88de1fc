//! Application context for the client process.
//!
//! Built once at startup and passed to whatever needs the configuration or
//! the tool registry. Owns the registry, and with it every spawned server
//! process, until [`AppContext::shutdown`] is called or the context is
//! dropped.

use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result;
use crate::client::ToolClientRegistry;

/// Configuration plus the resolved tool registry.
pub struct AppContext {
    config: Arc<Config>,
    registry: ToolClientRegistry,
}

impl AppContext {
    /// Load the server map, launch every server and resolve the tools.
    pub async fn initialize(config: Config) -> Result<Self> {
        let servers = config.client.load_servers()?;
        info!(
            "Launching {} tool server(s) with naming policy '{}'",
            servers.len(),
            config.client.tool_naming
        );

        let registry =
            ToolClientRegistry::connect(&servers, config.client.registry_options()).await?;

        Ok(Self {
            config: Arc::new(config),
            registry,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &ToolClientRegistry {
        &self.registry
    }

    /// Tear down every server process.
    pub async fn shutdown(self) {
        self.registry.shutdown().await;
    }
}
