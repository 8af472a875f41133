//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod search;
mod server;
mod tavily;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use search::FileSearchConfig;
pub use server::FileServerConfig;
pub use tavily::FileTavilyConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("server.command cannot be empty")]
    EmptyCommand,

    #[error("search.tool_pattern cannot be empty")]
    EmptyToolPattern,

    #[error(
        "no Tavily API key configured (set TAVILY_API_KEY or [tavily] api_key in tavily.toml)"
    )]
    MissingApiKey,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider credentials
    pub tavily: FileTavilyConfig,
    /// How to launch the MCP search server
    pub server: FileServerConfig,
    /// Search behaviour
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the settings every command depends on
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.startup_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "server.startup_timeout_seconds",
            ));
        }
        if self.search.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("search.timeout_seconds"));
        }
        if self.server.command.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCommand);
        }
        if self.search.tool_pattern.trim().is_empty() {
            return Err(ConfigValidationError::EmptyToolPattern);
        }
        Ok(())
    }

    /// Validate everything needed to actually reach the provider
    pub fn validate_for_search(&self) -> Result<(), ConfigValidationError> {
        self.validate()?;
        if self.tavily.api_key().is_none() {
            return Err(ConfigValidationError::MissingApiKey);
        }
        Ok(())
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.tavily.api_key.is_some() {
            config.tavily.api_key = Some(tavily::REDACTED.to_string());
        }
        config
    }
}
