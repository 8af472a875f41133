//! Agent-facing tool implementations
//!
//! - [`TavilySearchTool`]: the `TavilyTool` web search, as a [`ToolProvider`](tavily_domain::ToolProvider)
//! - [`JsonSchemaToolConverter`]: renders tool definitions as JSON Schema

pub mod schema;
pub mod tavily;

pub use schema::JsonSchemaToolConverter;
pub use tavily::{TAVILY_TOOL, TAVILY_TOOL_DESCRIPTION, TavilySearchTool, tavily_tool_definition};

use tavily_domain::tool::entities::ToolSpec;

/// Create the tool specification exposed by this crate
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new().register(tavily_tool_definition())
}
