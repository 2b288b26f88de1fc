//! Transport layer for the tool servers.
//!
//! The servers speak MCP over standard input/output only: the client
//! registry launches them as child processes and owns both pipes.
//! The transport handles the connection lifecycle and delegates message
//! processing to the [`ToolServer`](crate::core::ToolServer) handler.

mod error;
pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
