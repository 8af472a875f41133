//! MCP server launch configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Executable that starts the MCP search server
    pub command: String,
    /// Arguments passed to `command`
    pub args: Vec<String>,
    /// Extra environment for the server process
    pub env: BTreeMap<String, String>,
    /// Time allowed for spawn, handshake and tool discovery
    pub startup_timeout_seconds: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["-y".to_string(), "tavily-mcp@latest".to_string()],
            env: BTreeMap::new(),
            startup_timeout_seconds: 30,
        }
    }
}
