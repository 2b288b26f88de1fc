//! Math tool server.
//!
//! Serves `add` and `multiply` over stdio until the client disconnects.

use mcp_tool_hub::core::server::run_tool_server;
use mcp_tool_hub::domains::tools::ToolSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_tool_server(ToolSet::Math).await
}
