//! MCP Tool Hub Library
//!
//! This crate provides two toy Model Context Protocol (MCP) tool servers and
//! the client-side registry that launches them as child processes and routes
//! tool calls to them over stdio.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, logging, the tool server handler,
//!   the stdio transport and the application context
//! - **domains**: Server-side business logic
//!   - **tools**: The tool definitions (`add`, `multiply`, `get_weather`) and
//!     the tool sets that group them into servers
//! - **client**: The tool client registry (launch, resolve, route, tear down)
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_tool_hub::{client::ToolClientRegistry, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let servers = config.client.load_servers()?;
//!     let registry = ToolClientRegistry::connect(&servers, config.client.registry_options()).await?;
//!     let outcome = registry
//!         .call_tool("add", serde_json::json!({ "a": 3, "b": 5 }))
//!         .await?;
//!     println!("{outcome}");
//!     registry.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AppContext, Config, Error, Result, ToolServer};
