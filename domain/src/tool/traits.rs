//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.

use super::entities::{ToolCall, ToolDefinition};
use crate::core::error::DomainError;

/// Validator for tool calls
///
/// This is a pure domain trait that checks a call against its definition
/// without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), DomainError>;
}

/// Default implementation of ToolValidator
///
/// Rejects missing required parameters, unknown parameters, values of the
/// wrong JSON type and values that differ from a pinned `fixed_value`.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), DomainError> {
        for param in &definition.parameters {
            let value = call.arguments.get(&param.name);

            if param.required && value.is_none_or(|v| v.is_null()) {
                return Err(DomainError::invalid_argument(
                    &param.name,
                    format!("required by tool '{}'", definition.name),
                ));
            }

            let Some(value) = value else { continue };

            if !param.accepts_type(value) {
                return Err(DomainError::invalid_argument(
                    &param.name,
                    format!("expected {}, got {}", param.param_type, value),
                ));
            }

            if let Some(fixed) = &param.fixed_value
                && !value.is_null()
                && value != fixed
            {
                return Err(DomainError::invalid_argument(
                    &param.name,
                    format!("only {} is accepted, got {}", fixed, value),
                ));
            }
        }

        for arg_name in call.arguments.keys() {
            if definition.parameter(arg_name).is_none() {
                return Err(DomainError::invalid_argument(
                    arg_name,
                    format!("unknown parameter for tool '{}'", definition.name),
                ));
            }
        }

        Ok(())
    }
}
