//! Wire shapes exchanged with the search server's `tools/call`.

use rmcp::model::{CallToolResult, RawContent};
use serde::Serialize;
use serde_json::{Map, Value};
use tavily_domain::{ProviderPayload, SearchDepth, SearchRequest, SearchTopic};
use tracing::debug;

/// Arguments of the remote search tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchArguments<'a> {
    pub query: &'a str,
    pub max_results: u32,
    pub search_depth: SearchDepth,
    pub include_images: bool,
    pub topic: SearchTopic,
    pub include_answer: bool,
    pub include_raw_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<&'a [String]>,
}

impl<'a> From<&'a SearchRequest> for SearchArguments<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            query: &request.query,
            max_results: request.max_results,
            search_depth: request.search_depth,
            include_images: request.include_images(),
            topic: request.topic,
            include_answer: request.include_answer,
            include_raw_content: request.include_raw_content(),
            include_domains: request.include_domains.as_deref(),
        }
    }
}

impl SearchArguments<'_> {
    /// Serialize into a JSON object, then apply `extra` on top.
    pub fn into_object(self, extra: &Map<String, Value>) -> Result<Map<String, Value>, serde_json::Error> {
        let mut arguments = match serde_json::to_value(&self)? {
            Value::Object(map) => map,
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "search arguments serialized to {}",
                    other
                )));
            }
        };
        for (key, value) in extra {
            arguments.insert(key.clone(), value.clone());
        }
        Ok(arguments)
    }
}

/// Build the full argument object for `request`.
pub fn search_arguments(request: &SearchRequest) -> Result<Map<String, Value>, serde_json::Error> {
    SearchArguments::from(request).into_object(&request.extra)
}

/// Collect the parts of a tool result the parser understands.
pub fn payload_from_result(result: CallToolResult) -> ProviderPayload {
    let mut text_blocks = Vec::new();
    for content in &result.content {
        match &**content {
            RawContent::Text(text) => text_blocks.push(text.text.clone()),
            _ => debug!("Ignoring non-text content block from search tool"),
        }
    }

    ProviderPayload {
        structured: result.structured_content,
        text_blocks,
        is_error: result.is_error.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;

    #[test]
    fn test_default_arguments() {
        let request = SearchRequest::new("Python async programming").unwrap();
        let arguments = search_arguments(&request).unwrap();

        assert_eq!(
            Value::Object(arguments),
            json!({
                "query": "Python async programming",
                "max_results": 5,
                "search_depth": "basic",
                "include_images": false,
                "topic": "general",
                "include_answer": false,
                "include_raw_content": false
            })
        );
    }

    #[test]
    fn test_domains_and_extra() {
        let request = SearchRequest::new("q")
            .unwrap()
            .with_domains(["github.com", "stackoverflow.com"])
            .with_extra("days", 3)
            .with_extra("topic", "news");
        let arguments = search_arguments(&request).unwrap();

        assert_eq!(arguments["include_domains"], json!(["github.com", "stackoverflow.com"]));
        assert_eq!(arguments["days"], json!(3));
        // extra is applied last
        assert_eq!(arguments["topic"], json!("news"));
    }

    #[test]
    fn test_payload_from_text_result() {
        let result = CallToolResult::success(vec![
            Content::text("Title: A"),
            Content::image("aGVsbG8=", "image/png"),
            Content::text("URL: https://a.dev"),
        ]);
        let payload = payload_from_result(result);

        assert_eq!(payload.text_blocks, vec!["Title: A", "URL: https://a.dev"]);
        assert!(payload.structured.is_none());
        assert!(!payload.is_error);
    }

    #[test]
    fn test_payload_from_error_result() {
        let payload = payload_from_result(CallToolResult::error(vec![Content::text(
            "Invalid API key",
        )]));
        assert!(payload.is_error);
        assert_eq!(payload.joined_text(), "Invalid API key");
    }

    #[test]
    fn test_payload_keeps_structured_content() {
        let body = json!({"results": [{"title": "T", "url": "https://t.dev"}]});
        let payload = payload_from_result(CallToolResult::structured(body.clone()));
        assert_eq!(payload.structured, Some(body));
    }
}
