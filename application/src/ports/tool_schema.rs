//! Tool schema conversion port.
//!
//! Separates "what the tool accepts" (domain) from "how to serialize it for
//! an agent framework" (infrastructure). The domain layer defines
//! [`ToolDefinition`] and [`ToolSpec`]; this port handles the JSON Schema
//! conversion that frameworks and LLM APIs require.

use tavily_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value>;
}
