//! Provider credentials from TOML (`[tavily]` section)

use serde::{Deserialize, Serialize};

pub(super) const REDACTED: &str = "********";

/// Raw credentials configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTavilyConfig {
    /// Tavily API key, normally supplied through `TAVILY_API_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl FileTavilyConfig {
    /// The key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
