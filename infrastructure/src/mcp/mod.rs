//! MCP search adapter
//!
//! Talks to the Tavily MCP server (`npx -y tavily-mcp@latest`) over stdio.
//!
//! ```text
//! TavilyMcpGateway::search
//!   └─ McpSession::spawn   child process + initialize + tools/list
//!        └─ call           tools/call → ProviderPayload
//!        └─ close          cancel client, wait for exit
//! ```

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod server;
pub mod session;

pub use error::McpError;
pub use gateway::{DEFAULT_STARTUP_TIMEOUT, DEFAULT_TOOL_PATTERN, TavilyMcpGateway};
pub use protocol::{SearchArguments, payload_from_result, search_arguments};
pub use server::McpServerParams;
pub use session::{McpSession, select_tool};
