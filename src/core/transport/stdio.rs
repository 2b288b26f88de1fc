//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the only mode the tool servers
//! speak, since the client registry launches them as child processes.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::ToolServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    ///
    /// Completes the handshake, then answers requests in arrival order until
    /// the client closes stdin.
    pub async fn run(server: ToolServer) -> TransportResult<()> {
        let name = server.name().to_string();
        info!("{} ready - communicating via stdin/stdout", name);

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("{} STDIO transport finished: {:?}", name, reason);
        Ok(())
    }
}
