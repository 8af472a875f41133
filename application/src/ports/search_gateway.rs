//! Search Gateway port
//!
//! Defines the interface for reaching the web search provider.

use async_trait::async_trait;
use tavily_domain::{ProviderPayload, SearchRequest};
use thiserror::Error;

/// Errors that can occur during search gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Search tool not found: {0}")]
    ToolNotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Gateway to the search provider
///
/// This port defines how the application layer reaches the provider.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Run one search and return the provider's raw answer
    async fn search(&self, request: &SearchRequest) -> Result<ProviderPayload, GatewayError>;

    /// Whether the provider can be reached at all
    async fn is_available(&self) -> bool;
}
