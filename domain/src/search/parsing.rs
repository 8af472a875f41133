//! Provider payload parsing.
//!
//! The search backend answers through an MCP `tools/call` result whose shape
//! is not contractually fixed. Depending on the server version the useful
//! data arrives as:
//!
//! 1. `structuredContent`: a search response object
//! 2. a text block holding JSON, sometimes JSON nested inside JSON
//!    (`[{"type": "text", "text": "{\"results\": ...}"}]`)
//! 3. a text block in the human-readable `Title:` / `URL:` / `Content:` layout
//!
//! [`parse_provider_payload`] tries them in that order. Structured data is
//! authoritative; the text layout is only a fallback.

use super::result::{ParsedResult, SearchOutput, positional_score};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deepest JSON-in-JSON nesting that will be unwrapped.
const MAX_NESTING: usize = 4;

/// Raw, unparsed output of one provider tool call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderPayload {
    /// Structured content, when the server sends any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
    /// Text content blocks, in order
    #[serde(default)]
    pub text_blocks: Vec<String>,
    /// Whether the server flagged the call as failed
    #[serde(default)]
    pub is_error: bool,
}

impl ProviderPayload {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text_blocks: vec![text.into()],
            ..Default::default()
        }
    }

    pub fn from_structured(value: Value) -> Self {
        Self {
            structured: Some(value),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text_blocks: vec![message.into()],
            is_error: true,
            ..Default::default()
        }
    }

    /// All text blocks joined by newlines.
    pub fn joined_text(&self) -> String {
        self.text_blocks.join("\n")
    }
}

/// Intermediate hit before filtering and scoring.
#[derive(Debug, Clone, PartialEq)]
struct RawHit {
    title: String,
    url: String,
    content: String,
    score: Option<f64>,
}

/// Turn a provider payload into a [`SearchOutput`] for `query`.
///
/// A payload that decodes to nothing yields an empty result list, not an
/// error. A payload flagged `is_error` yields [`DomainError::Provider`].
pub fn parse_provider_payload(
    query: &str,
    payload: &ProviderPayload,
) -> Result<SearchOutput, DomainError> {
    if payload.is_error {
        let text = payload.joined_text();
        let message = if text.trim().is_empty() {
            "provider returned an error without details".to_string()
        } else {
            text.trim().to_string()
        };
        return Err(DomainError::Provider(message));
    }

    let hits = payload
        .structured
        .as_ref()
        .and_then(|value| decode_value(value, 0))
        .or_else(|| payload.text_blocks.iter().find_map(|t| decode_json_text(t, 0)))
        .unwrap_or_else(|| parse_text_results(&payload.joined_text()));

    Ok(SearchOutput::new(query, rank(hits)))
}

/// Decode a JSON value into hits, unwrapping nested text/JSON layers.
fn decode_value(value: &Value, depth: usize) -> Option<Vec<RawHit>> {
    if depth > MAX_NESTING {
        return None;
    }

    match value {
        Value::Object(map) => {
            if let Some(results) = map.get("results").and_then(Value::as_array) {
                return Some(results.iter().filter_map(hit_from_json).collect());
            }
            if let Some(text) = map.get("text").and_then(Value::as_str) {
                return decode_text(text, depth + 1);
            }
            if let Some(blocks) = map.get("content").and_then(Value::as_array) {
                return blocks.iter().find_map(|b| decode_value(b, depth + 1));
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|item| decode_value(item, depth + 1)),
        Value::String(text) => decode_text(text, depth + 1),
        _ => None,
    }
}

/// Decode text that may be JSON or the `Title:` layout.
fn decode_text(text: &str, depth: usize) -> Option<Vec<RawHit>> {
    if let Some(hits) = decode_json_text(text, depth) {
        return Some(hits);
    }
    let hits = parse_text_results(text);
    if hits.is_empty() { None } else { Some(hits) }
}

/// Decode text only if it is JSON.
fn decode_json_text(text: &str, depth: usize) -> Option<Vec<RawHit>> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    let value: Value = serde_json::from_str(trimmed).ok()?;
    decode_value(&value, depth)
}

fn hit_from_json(item: &Value) -> Option<RawHit> {
    let item = item.as_object()?;
    let text_field = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(RawHit {
        title: text_field("title"),
        url: text_field("url"),
        content: text_field("content"),
        score: item.get("score").and_then(Value::as_f64),
    })
}

/// Parse the human-readable result layout.
///
/// ```text
/// Title: <title>
/// URL: <url>
/// Content: <first line>
/// <more content lines>
/// ```
///
/// Anything before the first `Title:` is ignored. Content runs from the
/// `Content:` line to the end of the section and is joined with spaces.
fn parse_text_results(text: &str) -> Vec<RawHit> {
    let mut hits = Vec::new();

    for section in text.split("Title:").skip(1) {
        let lines: Vec<&str> = section.trim().lines().collect();
        let title = lines.first().map(|l| l.trim()).unwrap_or_default();

        let mut url = "";
        let mut content = String::new();

        for (i, line) in lines.iter().enumerate() {
            let line = line.trim_start();
            if let Some(rest) = line.strip_prefix("URL:") {
                url = rest.trim();
            } else if line.starts_with("Content:") {
                content = lines[i..]
                    .iter()
                    .map(|l| {
                        let l = l.trim();
                        l.strip_prefix("Content:").unwrap_or(l).trim()
                    })
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                break;
            }
        }

        hits.push(RawHit {
            title: title.to_string(),
            url: url.to_string(),
            content,
            score: None,
        });
    }

    hits
}

/// Drop incomplete hits, trim content and assign scores.
fn rank(hits: Vec<RawHit>) -> Vec<ParsedResult> {
    hits.into_iter()
        .filter(|h| !h.title.trim().is_empty() && !h.url.trim().is_empty())
        .enumerate()
        .map(|(index, h)| ParsedResult {
            title: h.title.trim().to_string(),
            url: h.url.trim().to_string(),
            content: h.content.trim().to_string(),
            score: h.score.unwrap_or_else(|| positional_score(index)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEXT_LAYOUT: &str = "Detailed Results:\n\n\
        Title: Async in Python\n\
        URL: https://docs.python.org/3/library/asyncio.html\n\
        Content: asyncio is a library\n\
        to write concurrent code.\n\n\
        Title: No url here\n\
        Content: dropped\n\n\
        Title: Real Python\n\
        URL: https://realpython.com/async-io-python/\n\
        Content: A walkthrough.\n";

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_structured_content_wins() {
        let payload = ProviderPayload {
            structured: Some(json!({
                "query": "provider rewrote this",
                "results": [
                    {"title": "A", "url": "https://a.dev", "content": " alpha ", "score": 0.42},
                    {"title": "B", "url": "https://b.dev", "content": "beta"}
                ]
            })),
            text_blocks: vec![TEXT_LAYOUT.to_string()],
            is_error: false,
        };

        let output = parse_provider_payload("my query", &payload).unwrap();
        assert_eq!(output.query, "my query");
        assert_eq!(output.total_results, 2);
        assert_eq!(output.results[0].content, "alpha");
        assert_close(output.results[0].score, 0.42);
        assert_close(output.results[1].score, 0.9);
    }

    #[test]
    fn test_json_text_block() {
        let body = json!({"results": [{"title": "T", "url": "https://t.dev", "content": "c", "score": 0.8}]});
        let payload = ProviderPayload::from_text(body.to_string());

        let output = parse_provider_payload("q", &payload).unwrap();
        assert_eq!(output.results.len(), 1);
        assert_close(output.results[0].score, 0.8);
    }

    #[test]
    fn test_json_nested_in_json() {
        let inner = json!([{"type": "text", "text": TEXT_LAYOUT}]).to_string();
        let outer = json!([{"type": "text", "text": inner}]).to_string();
        let payload = ProviderPayload::from_text(outer);

        let output = parse_provider_payload("q", &payload).unwrap();
        assert_eq!(output.total_results, 2);
        assert_eq!(output.results[1].title, "Real Python");
    }

    #[test]
    fn test_text_layout_fallback() {
        let output = parse_provider_payload("q", &ProviderPayload::from_text(TEXT_LAYOUT)).unwrap();

        assert_eq!(output.total_results, 2);
        let first = &output.results[0];
        assert_eq!(first.title, "Async in Python");
        assert_eq!(first.url, "https://docs.python.org/3/library/asyncio.html");
        assert_eq!(first.content, "asyncio is a library to write concurrent code.");
        assert_close(first.score, 1.0);
        // scores are positional over kept results, not over raw sections
        assert_close(output.results[1].score, 0.9);
    }

    #[test]
    fn test_text_blocks_are_joined_for_fallback() {
        let payload = ProviderPayload {
            text_blocks: vec![
                "Title: Split".to_string(),
                "URL: https://split.dev\nContent: across blocks".to_string(),
            ],
            ..Default::default()
        };
        let output = parse_provider_payload("q", &payload).unwrap();
        assert_eq!(output.results[0].url, "https://split.dev");
        assert_eq!(output.results[0].content, "across blocks");
    }

    #[test]
    fn test_only_leading_content_label_is_stripped() {
        let text = "Title: Labels\nURL: https://labels.dev\nContent: the Content: header\nContent: second line";
        let output = parse_provider_payload("q", &ProviderPayload::from_text(text)).unwrap();
        assert_eq!(output.results[0].content, "the Content: header second line");
    }

    #[test]
    fn test_unrecognized_payload_is_empty() {
        let output =
            parse_provider_payload("q", &ProviderPayload::from_text("No results found.")).unwrap();
        assert!(output.is_empty());
        assert_eq!(output.total_results, 0);
    }

    #[test]
    fn test_error_payload() {
        let err = parse_provider_payload("q", &ProviderPayload::error("Invalid API key"))
            .unwrap_err();
        assert_eq!(err, DomainError::Provider("Invalid API key".to_string()));

        let empty = ProviderPayload {
            is_error: true,
            ..Default::default()
        };
        assert!(matches!(
            parse_provider_payload("q", &empty),
            Err(DomainError::Provider(msg)) if msg.contains("without details")
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let mut text = json!({"results": [{"title": "deep", "url": "https://deep.dev"}]}).to_string();
        for _ in 0..8 {
            text = json!({"text": text}).to_string();
        }
        let output = parse_provider_payload("q", &ProviderPayload::from_text(text)).unwrap();
        assert!(output.is_empty());
    }
}
