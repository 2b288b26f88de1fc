//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks shared by the tool
//! servers and the client: error handling, configuration, logging, the server
//! handler, the stdio transport and the application context.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod server;
pub mod transport;

pub use config::Config;
pub use context::AppContext;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::ToolServer;
pub use transport::{StdioTransport, TransportError, TransportResult};
