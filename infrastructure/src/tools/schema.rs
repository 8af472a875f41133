//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that produces provider-neutral
//! JSON Schema for agent frameworks and tool-calling LLM APIs.

use serde_json::{Map, Value, json};
use tavily_application::ports::tool_schema::ToolSchemaPort;
use tavily_domain::tool::entities::{ToolDefinition, ToolParameter, ToolSpec};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - `"array"` → `"array"` of strings
/// - anything else → `"string"`
///
/// Parameters pinned to a single value carry it as `const` and `default`.
pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn parameter_schema(param: &ToolParameter) -> Value {
        let mut prop = Map::new();
        match param.param_type.as_str() {
            "array" => {
                prop.insert("type".to_string(), json!("array"));
                prop.insert("items".to_string(), json!({"type": "string"}));
            }
            "number" => {
                prop.insert("type".to_string(), json!("number"));
            }
            "integer" => {
                prop.insert("type".to_string(), json!("integer"));
            }
            "boolean" => {
                prop.insert("type".to_string(), json!("boolean"));
            }
            _ => {
                prop.insert("type".to_string(), json!("string"));
            }
        }
        prop.insert("description".to_string(), json!(param.description));

        if let Some(fixed) = &param.fixed_value {
            prop.insert("const".to_string(), fixed.clone());
            prop.insert("default".to_string(), fixed.clone());
        }

        Value::Object(prop)
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(param.name.clone(), Self::parameter_schema(param));
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tavily_tool_definition;
    use tavily_domain::tool::entities::RiskLevel;

    #[test]
    fn test_tavily_tool_schema() {
        let schema = JsonSchemaToolConverter.tool_to_schema(&tavily_tool_definition());

        assert_eq!(schema["name"], "TavilyTool");
        let input = &schema["input_schema"];
        assert_eq!(input["type"], "object");
        assert_eq!(input["required"], json!(["query"]));
        assert_eq!(input["additionalProperties"], json!(false));

        let props = &input["properties"];
        assert_eq!(props["query"]["type"], "string");
        assert_eq!(props["max_results"], json!({
            "type": "integer",
            "description": props["max_results"]["description"],
            "const": 5,
            "default": 5
        }));
        assert_eq!(props["search_depth"]["const"], "basic");
        assert_eq!(props["include_answer"]["const"], false);
        assert_eq!(props["include_domains"]["type"], "array");
        assert_eq!(props["include_domains"]["items"], json!({"type": "string"}));
        assert!(props["include_domains"].get("const").is_none());
    }

    #[test]
    fn test_unknown_type_maps_to_string() {
        let tool = ToolDefinition::new("t", "test", RiskLevel::Low)
            .with_parameter(ToolParameter::new("p", "path", false).with_type("path"));
        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        assert_eq!(schema["input_schema"]["properties"]["p"]["type"], "string");
        assert_eq!(schema["input_schema"]["required"], json!([]));
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("zeta", "z", RiskLevel::Low))
            .register(ToolDefinition::new("alpha", "a", RiskLevel::Low));
        let schemas = JsonSchemaToolConverter.all_tools_schema(&spec);
        let names: Vec<_> = schemas.iter().map(|s| s["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
