//! Tool Registry - central list of all tools.
//!
//! The registry is the single source of truth for tool names.
//! `router.rs` has a test that keeps the two in sync.

use super::definitions::{CommoditySearchTool, HsCodeDetailTool};

/// Tool registry - enumerates all available tools.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![HsCodeDetailTool::NAME, CommoditySearchTool::NAME]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names, vec!["get_hscode_detail", "search_commodity_description"]);
    }
}
