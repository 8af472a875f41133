//! Configuration file loading for tavily-tool
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `TAVILY_API_KEY`, then `TAVILY_TOOL_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./tavily.toml` or `./.tavily.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tavily-tool/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat, FileSearchConfig,
    FileServerConfig, FileTavilyConfig,
};
pub use loader::ConfigLoader;
