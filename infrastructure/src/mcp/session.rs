//! A live connection to the MCP search server.
//!
//! [`McpSession::spawn`] starts the server process, performs the MCP
//! handshake over its stdio and resolves which remote tool performs the
//! search. The protocol itself is handled by `rmcp`.

use super::error::{McpError, Result};
use super::protocol::payload_from_result;
use super::server::McpServerParams;
use rmcp::model::CallToolRequestParams;
use rmcp::service::RunningService;
use rmcp::{ClientHandler, RoleClient, ServiceExt};
use serde_json::{Map, Value};
use std::time::Duration;
use tavily_domain::ProviderPayload;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, BufReader};
use tokio::process::{Child, ChildStderr};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Time the server gets to exit on its own after stdin closes.
const EXIT_GRACE: Duration = Duration::from_secs(2);

/// Client-side handler; the search server never calls back into us.
#[derive(Clone, Debug, Default)]
pub struct SearchClientHandler;

impl ClientHandler for SearchClientHandler {}

/// One MCP client connection plus the process behind it, if any.
pub struct McpSession {
    service: RunningService<RoleClient, SearchClientHandler>,
    tool_name: String,
    child: Option<Child>,
    stderr_task: Option<JoinHandle<()>>,
}

impl McpSession {
    /// Spawn the server described by `params` and connect to it.
    pub async fn spawn(params: &McpServerParams, tool_pattern: &str) -> Result<Self> {
        debug!("Spawning MCP server: {}", params.display_command());

        let mut child = params
            .to_command()
            .spawn()
            .map_err(|source| McpError::SpawnError {
                command: params.command.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| McpError::SpawnError {
            command: params.command.clone(),
            source: std::io::Error::other("Failed to capture stdin"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| McpError::SpawnError {
            command: params.command.clone(),
            source: std::io::Error::other("Failed to capture stdout"),
        })?;
        let stderr_task = child.stderr.take().map(|stderr| tokio::spawn(forward_stderr(stderr)));

        // On failure `child` drops here and kill_on_drop reaps it.
        let mut session = Self::connect(stdout, stdin, tool_pattern).await?;
        session.child = Some(child);
        session.stderr_task = stderr_task;
        Ok(session)
    }

    /// Connect over an existing byte stream pair.
    pub async fn connect<R, W>(reader: R, writer: W, tool_pattern: &str) -> Result<Self>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let service = SearchClientHandler
            .serve((reader, writer))
            .await
            .map_err(|e| McpError::HandshakeFailed(e.to_string()))?;

        if let Some(info) = service.peer_info() {
            debug!(
                "Connected to MCP server: {} {}",
                info.server_info.name, info.server_info.version
            );
        }

        let tools = match service.list_all_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                shutdown(service).await;
                return Err(McpError::RequestFailed(format!("tools/list failed: {}", e)));
            }
        };
        let names: Vec<String> = tools.iter().map(|tool| tool.name.to_string()).collect();

        let Some(tool_name) = select_tool(&names, tool_pattern) else {
            shutdown(service).await;
            return Err(McpError::ToolNotFound {
                pattern: tool_pattern.to_string(),
                available: if names.is_empty() {
                    "nothing".to_string()
                } else {
                    names.join(", ")
                },
            });
        };
        let tool_name = tool_name.to_string();
        info!("Using search tool '{}'", tool_name);

        Ok(Self {
            service,
            tool_name,
            child: None,
            stderr_task: None,
        })
    }

    /// Name of the remote tool this session calls.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Invoke the search tool once.
    pub async fn call(&self, arguments: Map<String, Value>) -> Result<ProviderPayload> {
        debug!("Calling '{}' with {} argument(s)", self.tool_name, arguments.len());

        let params = CallToolRequestParams::new(self.tool_name.clone()).with_arguments(arguments);

        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|e| McpError::RequestFailed(format!("tools/call '{}' failed: {}", self.tool_name, e)))?;

        Ok(payload_from_result(result))
    }

    /// Shut the connection down and wait for the server to exit.
    pub async fn close(self) {
        let Self {
            service,
            child,
            stderr_task,
            ..
        } = self;

        shutdown(service).await;

        if let Some(mut child) = child {
            match tokio::time::timeout(EXIT_GRACE, child.wait()).await {
                Ok(Ok(status)) => debug!("MCP server exited: {}", status),
                Ok(Err(e)) => warn!("Failed to wait for MCP server: {}", e),
                Err(_) => {
                    debug!("MCP server still running after {:?}, killing", EXIT_GRACE);
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill MCP server: {}", e);
                    }
                }
            }
        }

        if let Some(task) = stderr_task {
            task.abort();
        }
    }
}

/// Stop the client task and drop the transport.
async fn shutdown(service: RunningService<RoleClient, SearchClientHandler>) {
    if let Err(e) = service.cancel().await {
        debug!("MCP client task ended abnormally: {}", e);
    }
}

/// First tool whose name contains `pattern`.
pub fn select_tool<'a>(names: &'a [String], pattern: &str) -> Option<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .find(|name| name.contains(pattern))
}

async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => debug!("[mcp-server] {}", line),
            Ok(None) => break,
            Err(e) => {
                debug!("Stopped reading MCP server stderr: {}", e);
                break;
            }
        }
    }
}
