//! Domain layer for tavily-tool
//!
//! This crate contains the core types of the search tool. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool
//!
//! A typed callable that an agent framework hands to a language model:
//! a [`ToolDefinition`] describes it, a [`ToolCall`] invokes it, and a
//! [`ToolResult`] carries the outcome back.
//!
//! ## Search
//!
//! - [`SearchToolInput`]: what the model is allowed to send (mostly fixed values)
//! - [`SearchRequest`]: the full request forwarded to the provider
//! - [`ProviderPayload`]: whatever the provider returned, unparsed
//! - [`SearchOutput`]: the strongly-typed result handed back to the framework

pub mod config;
pub mod core;
pub mod search;
pub mod tool;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use search::{
    ParsedResult, ProviderPayload, SearchDepth, SearchOutput, SearchRequest, SearchToolInput,
    SearchTopic, parse_provider_payload,
};
pub use tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    provider::{ProviderError, ToolProvider},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
