//! `TavilyTool`: web search for agents, backed by the Tavily MCP server.
//!
//! # Parameters
//!
//! | Name | Type | Required | Accepted values |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | any non-blank text |
//! | `max_results` | integer | No | `5` only |
//! | `search_depth` | string | No | `"basic"` only |
//! | `include_answer` | boolean | No | `false` only |
//! | `include_domains` | array | No | list of domains |
//!
//! # Output
//!
//! On success the tool output is a pretty-printed JSON
//! [`SearchOutput`]: `{query, results: [{title, url, content, score}], total_results}`.
//!
//! # Safety
//!
//! - **Risk level**: [`Low`](tavily_domain::RiskLevel::Low), read-only
//! - **Timeout**: [`SearchParams::timeout`] (60 seconds by default)

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tavily_application::config::SearchParams;
use tavily_application::ports::progress::{NoProgress, SearchProgressNotifier};
use tavily_application::ports::search_gateway::SearchGateway;
use tavily_application::use_cases::run_search::{RunSearchError, RunSearchInput, RunSearchUseCase};
use tavily_domain::search::FIXED_MAX_RESULTS;
use tavily_domain::tool::{
    DefaultToolValidator, ToolValidator,
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    provider::{ProviderError, ToolProvider},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use tavily_domain::{SearchDepth, SearchOutput, SearchToolInput};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Canonical tool name.
pub const TAVILY_TOOL: &str = "TavilyTool";

/// Description shown to the model.
pub const TAVILY_TOOL_DESCRIPTION: &str =
    "Search the internet for current information that you might not already know";

/// Create the [`ToolDefinition`] for `TavilyTool`.
pub fn tavily_tool_definition() -> ToolDefinition {
    ToolDefinition::new(TAVILY_TOOL, TAVILY_TOOL_DESCRIPTION, RiskLevel::Low)
        .with_parameter(
            ToolParameter::new(
                "query",
                "The query that will be searched for on the internet.",
                true,
            )
            .with_type("string"),
        )
        .with_parameter(
            ToolParameter::new("max_results", "Fixed number of search results.", false)
                .with_type("integer")
                .with_fixed_value(FIXED_MAX_RESULTS),
        )
        .with_parameter(
            ToolParameter::new("search_depth", "Fixed search depth.", false)
                .with_type("string")
                .with_fixed_value(SearchDepth::Basic.as_str()),
        )
        .with_parameter(
            ToolParameter::new(
                "include_answer",
                "Answer inclusion is fixed to False.",
                false,
            )
            .with_type("boolean")
            .with_fixed_value(false),
        )
        .with_parameter(
            ToolParameter::new(
                "include_domains",
                "Optional list of domains to constrain the search.",
                false,
            )
            .with_type("array"),
        )
}

/// The Tavily search tool as seen by an agent framework.
pub struct TavilySearchTool<G: SearchGateway + 'static> {
    use_case: RunSearchUseCase<G>,
    definition: ToolDefinition,
    params: SearchParams,
    progress: Arc<dyn SearchProgressNotifier>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: SearchGateway + 'static> TavilySearchTool<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            use_case: RunSearchUseCase::new(gateway),
            definition: tavily_tool_definition(),
            params: SearchParams::default(),
            progress: Arc::new(NoProgress),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn SearchProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Typed entry point: run one search for an already-validated input.
    pub async fn search(&self, input: SearchToolInput) -> Result<SearchOutput, RunSearchError> {
        let input = RunSearchInput::new(input.into_request()).with_params(self.params.clone());
        match &self.cancellation_token {
            Some(token) => {
                self.use_case
                    .execute_with_cancellation(input, self.progress.as_ref(), token.clone())
                    .await
            }
            None => {
                self.use_case
                    .execute_with_progress(input, self.progress.as_ref())
                    .await
            }
        }
    }

    /// Turn raw call arguments into a typed input.
    fn parse_call(&self, call: &ToolCall) -> Result<SearchToolInput, ToolError> {
        DefaultToolValidator
            .validate(call, &self.definition)
            .and_then(|_| SearchToolInput::from_call(call))
            .map_err(|e| ToolError::invalid_argument(e.to_string()))
    }
}

/// Map a failed search onto the tool error vocabulary.
fn search_error(err: &RunSearchError) -> ToolError {
    if err.is_timeout() {
        ToolError::timeout("search").with_details(err.to_string())
    } else if err.is_cancelled() {
        ToolError::cancelled("search")
    } else {
        ToolError::execution_failed(format!("Failed to perform search: {}", err))
    }
}

#[async_trait]
impl<G: SearchGateway + 'static> ToolProvider for TavilySearchTool<G> {
    fn id(&self) -> &str {
        "tavily"
    }

    fn display_name(&self) -> &str {
        "Tavily Web Search"
    }

    async fn is_available(&self) -> bool {
        self.use_case.gateway().is_available().await
    }

    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError> {
        Ok(vec![self.definition.clone()])
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();

        if call.tool_name != TAVILY_TOOL {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::not_found(format!("tool '{}'", call.tool_name)),
            );
        }

        let input = match self.parse_call(call) {
            Ok(input) => input,
            Err(e) => {
                debug!("Rejected {} call: {}", TAVILY_TOOL, e);
                return ToolResult::failure(TAVILY_TOOL, e);
            }
        };

        let output = match self.search(input).await {
            Ok(output) => output,
            Err(e) => {
                error!("Tavily search failed: {}", e);
                return ToolResult::failure(TAVILY_TOOL, search_error(&e))
                    .with_duration(start.elapsed().as_millis() as u64);
            }
        };

        match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                let bytes = json.len();
                ToolResult::success(TAVILY_TOOL, json).with_metadata(ToolResultMetadata {
                    duration_ms: Some(start.elapsed().as_millis() as u64),
                    bytes: Some(bytes),
                    match_count: Some(output.total_results),
                })
            }
            Err(e) => ToolResult::failure(
                TAVILY_TOOL,
                ToolError::execution_failed(format!("Failed to perform search: {}", e)),
            ),
        }
    }
}
