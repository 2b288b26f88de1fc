//! Tool client registry.
//!
//! The client side of the hub: launches each configured tool server as a
//! child process speaking MCP over stdio, merges the servers' tool lists
//! into one routed catalog and forwards calls to the owning server.
//!
//! ## Architecture
//!
//! - `config.rs` - Launch configuration per server and the server map
//! - `connection.rs` - One live connection to a child process
//! - `registry.rs` - Resolution, name policy, routing and teardown
//! - `invocation.rs` - Request/outcome types seen by the orchestrator
//! - `error.rs` - Registry error types

mod config;
mod connection;
mod error;
mod invocation;
mod registry;

pub use config::{ServerLaunchConfig, ServersConfig, TransportKind};
pub use connection::ServerConnection;
pub use error::RegistryError;
pub use invocation::{InvocationOutcome, InvocationRequest};
pub use registry::{RegistryOptions, ResolvedTool, ToolClientRegistry, ToolNaming};
