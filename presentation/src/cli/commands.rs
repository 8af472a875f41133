//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tavily_domain::{SearchDepth, SearchTopic};

/// Output format for search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numbered, colored result listing
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for tavily_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => tavily_domain::OutputFormat::Text,
            OutputFormat::Json => tavily_domain::OutputFormat::Json,
        }
    }
}

/// Search depth accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DepthArg {
    Basic,
    Advanced,
}

impl From<DepthArg> for SearchDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Basic => SearchDepth::Basic,
            DepthArg::Advanced => SearchDepth::Advanced,
        }
    }
}

/// Search topic accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopicArg {
    General,
    News,
}

impl From<TopicArg> for SearchTopic {
    fn from(topic: TopicArg) -> Self {
        match topic {
            TopicArg::General => SearchTopic::General,
            TopicArg::News => SearchTopic::News,
        }
    }
}

/// CLI arguments for tavily-tool
#[derive(Parser, Debug)]
#[command(name = "tavily-tool")]
#[command(author, version, about = "Tavily web search over MCP, as an agent tool")]
#[command(long_about = r#"
tavily-tool runs web searches through the Tavily MCP server
(`npx -y tavily-mcp@latest`) and exposes them as the `TavilyTool` agent tool.

The API key is read from TAVILY_API_KEY or from `[tavily] api_key`.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./tavily.toml       Project-level config (or ./.tavily.toml)
3. ~/.config/tavily-tool/config.toml   Global config

Example:
  tavily-tool search "Python async programming"
  tavily-tool search "rust 2024 edition" --domain doc.rust-lang.org --domain github.com
  tavily-tool call '{"query": "latest tokio release"}'
  tavily-tool schema
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to `[output] format`, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily rolling files in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a web search and print the results
    Search(SearchArgs),

    /// Invoke the agent tool with raw JSON arguments
    Call {
        /// Arguments object, e.g. '{"query": "..."}'
        #[arg(value_name = "JSON")]
        arguments: String,
    },

    /// Print the tool's JSON Schema definition
    Schema,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// The query to search for
    pub query: String,

    /// Restrict results to this domain (can be specified multiple times)
    #[arg(short, long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Maximum number of results
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: Option<u32>,

    /// Search depth
    #[arg(long, value_enum)]
    pub depth: Option<DepthArg>,

    /// Search topic
    #[arg(long, value_enum)]
    pub topic: Option<TopicArg>,

    /// Ask the provider for a generated answer as well
    #[arg(long)]
    pub include_answer: bool,
}
