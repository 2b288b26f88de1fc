//! Registry error types.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by the tool client registry.
///
/// Server-reported tool failures are not errors at this level; they are
/// returned as [`InvocationOutcome::Failure`](super::InvocationOutcome).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The server process could not be spawned.
    #[error("Failed to launch server '{server}': {source}")]
    Launch {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// The process started but the MCP handshake failed.
    #[error("Handshake with server '{server}' failed: {message}")]
    Handshake { server: String, message: String },

    /// The server answered the tool listing with an error.
    #[error("Server '{server}' failed to list its tools: {message}")]
    ListTools { server: String, message: String },

    /// The server did not answer in time.
    #[error("Server '{server}' did not {operation} within {timeout:?}")]
    Timeout {
        server: String,
        operation: &'static str,
        timeout: Duration,
    },

    /// The channel to the server broke.
    #[error("Transport to server '{server}' failed: {message}")]
    Transport { server: String, message: String },

    /// The server's channel broke earlier in this session.
    #[error("Server '{0}' is unavailable")]
    ServerUnavailable(String),

    /// No resolved tool has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Two servers expose the same tool name.
    #[error("Tool '{tool}' is exposed by both '{first}' and '{second}'")]
    DuplicateTool {
        tool: String,
        first: String,
        second: String,
    },

    /// The call arguments are not a JSON object.
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },
}

impl RegistryError {
    /// Create a launch error.
    pub fn launch(server: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            server: server.into(),
            source,
        }
    }

    /// Create a handshake error.
    pub fn handshake(server: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handshake {
            server: server.into(),
            message: message.into(),
        }
    }

    /// Create a tool listing error.
    pub fn list_tools(server: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ListTools {
            server: server.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(server: impl Into<String>, operation: &'static str, timeout: Duration) -> Self {
        Self::Timeout {
            server: server.into(),
            operation,
            timeout,
        }
    }

    /// Create a transport error.
    pub fn transport(server: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            server: server.into(),
            message: message.into(),
        }
    }

    /// Create an "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create an "invalid arguments" error.
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
