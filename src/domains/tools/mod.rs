//! Tools domain module.
//!
//! This module handles all tool-related functionality for the tool servers.
//! Tools are executable functions that MCP clients call by name.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `catalog.rs` - The tool sets, i.e. which tools each server exposes
//! - `router.rs` - Builds the rmcp ToolRouter for a tool set
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `math/subtract.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to its tool set in `catalog.rs` and `router.rs`

mod catalog;
pub mod definitions;
mod error;
pub mod router;

pub use catalog::ToolSet;
pub use error::ToolError;
pub use router::build_tool_router;
