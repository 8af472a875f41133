//! MCP-backed implementation of the search gateway

use super::error::McpError;
use super::protocol::search_arguments;
use super::server::McpServerParams;
use super::session::McpSession;
use crate::config::FileConfig;
use async_trait::async_trait;
use std::time::Duration;
use tavily_application::ports::search_gateway::{GatewayError, SearchGateway};
use tavily_domain::{ProviderPayload, SearchRequest};
use tracing::{debug, info};

/// Default pattern used to find the search tool among the server's tools.
pub const DEFAULT_TOOL_PATTERN: &str = "tavily-search";

/// Default time allowed for spawn, handshake and tool discovery.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Search gateway that runs the Tavily MCP server as a subprocess.
///
/// Every search gets a fresh server process which is shut down before
/// the call returns, on success and on error alike.
#[derive(Debug, Clone)]
pub struct TavilyMcpGateway {
    params: McpServerParams,
    tool_pattern: String,
    startup_timeout: Duration,
}

impl TavilyMcpGateway {
    pub fn new(params: McpServerParams) -> Self {
        Self {
            params,
            tool_pattern: DEFAULT_TOOL_PATTERN.to_string(),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
        }
    }

    /// Build a gateway from validated configuration
    pub fn from_config(config: &FileConfig) -> Result<Self, GatewayError> {
        config
            .validate_for_search()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self::new(McpServerParams::from_config(config))
            .with_tool_pattern(config.search.tool_pattern.clone())
            .with_startup_timeout(Duration::from_secs(config.server.startup_timeout_seconds)))
    }

    pub fn with_tool_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.tool_pattern = pattern.into();
        self
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    pub fn params(&self) -> &McpServerParams {
        &self.params
    }

    pub fn tool_pattern(&self) -> &str {
        &self.tool_pattern
    }

    async fn open_session(&self) -> Result<McpSession, McpError> {
        match tokio::time::timeout(
            self.startup_timeout,
            McpSession::spawn(&self.params, &self.tool_pattern),
        )
        .await
        {
            Ok(session) => session,
            Err(_) => Err(McpError::Timeout),
        }
    }
}

impl Default for TavilyMcpGateway {
    fn default() -> Self {
        Self::new(McpServerParams::default())
    }
}

#[async_trait]
impl SearchGateway for TavilyMcpGateway {
    async fn search(&self, request: &SearchRequest) -> Result<ProviderPayload, GatewayError> {
        let arguments = search_arguments(request).map_err(McpError::from)?;

        let session = self.open_session().await?;
        info!("MCP session ready ({})", session.tool_name());

        let result = session.call(arguments).await;
        session.close().await;
        debug!("MCP session closed");

        Ok(result?)
    }

    async fn is_available(&self) -> bool {
        which::which(&self.params.command).is_ok()
    }
}
