//! Tool domain module
//!
//! This module defines how a capability is exposed to an agent framework as
//! a **tool**: a typed callable with a declared input schema, validated
//! arguments and a structured result.
//!
//! ```text
//! ┌────────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolDefinition │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (schema)       │    │ (invocation) │    │ (output)     │
//! └────────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolDefinition`]: Schema for a single tool (name, params, risk level)
//! - [`ToolCall`]: An invocation request with arguments
//! - [`ToolResult`]: Execution outcome with structured [`ToolResultMetadata`](value_objects::ToolResultMetadata)
//! - [`ToolValidator`]: Pure domain trait for parameter validation
//! - [`ToolProvider`]: The seam a host framework calls into
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolSchemaPort`): JSON Schema conversion port
//! - **Infrastructure** (`TavilySearchTool`): the provider that actually
//!   spawns the search backend

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolSpec};
pub use provider::{ProviderError, ToolProvider};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
