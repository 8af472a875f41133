//! Infrastructure layer for tavily-tool
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod mcp;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat,
    FileSearchConfig, FileServerConfig, FileTavilyConfig,
};
pub use mcp::{
    McpError, McpServerParams, McpSession, TavilyMcpGateway,
    error::Result,
};
pub use tools::{
    JsonSchemaToolConverter, TAVILY_TOOL, TavilySearchTool, default_tool_spec,
    tavily_tool_definition,
};
