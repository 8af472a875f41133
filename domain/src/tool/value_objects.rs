//! Tool domain value objects: result and error types
//!
//! These types form the **output side** of a tool invocation.
//! Every execution produces a [`ToolResult`] with optional
//! [`ToolResultMetadata`] (timing, byte counts, result counts).

use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// | Code | Model can fix it? | Description |
/// |------|-----------|-------------|
/// | `INVALID_ARGUMENT` | Yes | Missing/wrong parameters |
/// | `NOT_FOUND` | Yes | Unknown tool name |
/// | `EXECUTION_FAILED` | No | Provider process or search failure |
/// | `TIMEOUT` | No | Operation timed out |
/// | `CANCELLED` | No | Caller aborted the run |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "TIMEOUT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            "NOT_FOUND",
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }

    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::new(
            "CANCELLED",
            format!("Operation cancelled: {}", operation.into()),
        )
    }

    /// Whether the model can plausibly fix the call and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.code.as_str(), "INVALID_ARGUMENT" | "NOT_FOUND")
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, carrying output or error information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Output content (JSON text for the search tool)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Metadata about the execution
    #[serde(default)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about tool execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    /// Duration of execution in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Size of the output in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// Number of search results returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            output: Some(output.into()),
            error: None,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
            metadata: ToolResultMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.metadata.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::execution_failed("Failed to perform search: boom")
            .with_details("npx exited with status 1");

        assert_eq!(
            err.to_string(),
            "[EXECUTION_FAILED] Failed to perform search: boom (npx exited with status 1)"
        );
    }

    #[test]
    fn test_retryable_codes() {
        assert!(ToolError::invalid_argument("bad").is_retryable());
        assert!(ToolError::not_found("Other").is_retryable());
        assert!(!ToolError::timeout("search").is_retryable());
        assert!(!ToolError::cancelled("search").is_retryable());
    }

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("TavilyTool", "{}").with_duration(42);

        assert!(result.is_success());
        assert_eq!(result.output(), Some("{}"));
        assert!(result.error().is_none());
        assert_eq!(result.metadata.duration_ms, Some(42));
    }

    #[test]
    fn test_tool_result_failure_serializes_without_output() {
        let result = ToolResult::failure("TavilyTool", ToolError::timeout("search"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("output").is_none());
        assert_eq!(json["error"]["code"], "TIMEOUT");
    }
}
