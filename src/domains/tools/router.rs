//! Tool Router - builds the rmcp ToolRouter for a tool set.
//!
//! Each tool knows how to create its own route; this module only decides
//! which routes belong to which server.

use rmcp::handler::server::tool::ToolRouter;

use super::catalog::ToolSet;
use super::definitions::{AddTool, GetWeatherTool, MultiplyTool};

/// Build the tool router for the given tool set.
pub fn build_tool_router<S>(tool_set: ToolSet) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    match tool_set {
        ToolSet::Math => ToolRouter::new()
            .with_route(AddTool::create_route())
            .with_route(MultiplyTool::create_route()),
        ToolSet::Weather => ToolRouter::new().with_route(GetWeatherTool::create_route()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestServer {}

    #[test]
    fn test_build_math_router() {
        let router: ToolRouter<TestServer> = build_tool_router(ToolSet::Math);
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"add"));
        assert!(names.contains(&"multiply"));
    }

    #[test]
    fn test_catalog_matches_router() {
        // Ensure catalog and router have the same tools
        for set in ToolSet::ALL {
            let catalog_names = set.tool_names();

            let router: ToolRouter<TestServer> = build_tool_router(set);
            let router_tools = router.list_all();
            let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

            assert_eq!(catalog_names.len(), router_names.len());
            for name in catalog_names {
                assert!(router_names.contains(&name));
            }
        }
    }
}
