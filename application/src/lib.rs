//! Application layer for tavily-tool
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SearchParams;
pub use ports::{
    progress::{NoProgress, SearchProgressNotifier},
    search_gateway::{GatewayError, SearchGateway},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::run_search::{RunSearchError, RunSearchInput, RunSearchUseCase};
