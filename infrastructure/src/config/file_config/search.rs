//! Search configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};

/// Raw search configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Substring used to pick the search tool among the server's tools
    pub tool_pattern: String,
    /// Overall timeout for one search, in seconds
    pub timeout_seconds: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            tool_pattern: "tavily-search".to_string(),
            timeout_seconds: 60,
        }
    }
}
