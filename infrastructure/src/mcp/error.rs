//! Error types for the MCP search adapter

use tavily_application::ports::search_gateway::GatewayError;
use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur when talking to the MCP search server
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Failed to spawn MCP server '{command}': {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("MCP handshake failed: {0}")]
    HandshakeFailed(String),

    #[error("MCP request failed: {0}")]
    RequestFailed(String),

    #[error("No tool matching '{pattern}' (server offers: {available})")]
    ToolNotFound { pattern: String, available: String },

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Request timeout")]
    Timeout,
}

impl From<McpError> for GatewayError {
    fn from(err: McpError) -> Self {
        match err {
            McpError::SpawnError { .. } | McpError::HandshakeFailed(_) => {
                GatewayError::ConnectionError(err.to_string())
            }
            McpError::ToolNotFound { .. } => GatewayError::ToolNotFound(err.to_string()),
            McpError::RequestFailed(_) | McpError::SerializationError(_) => {
                GatewayError::RequestFailed(err.to_string())
            }
            McpError::TransportClosed => GatewayError::TransportClosed,
            McpError::Timeout => GatewayError::Timeout,
        }
    }
}
