//! Search request types.
//!
//! [`SearchToolInput`] is the narrow surface a language model is allowed to
//! drive: only the query and the domain filter are free, everything else is
//! pinned. [`SearchRequest`] is the wider request actually forwarded to the
//! provider, which direct callers (the CLI) may configure freely.

use crate::core::error::DomainError;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of results the agent tool always asks for.
pub const FIXED_MAX_RESULTS: u32 = 5;

/// How much effort the provider spends per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

impl FromStr for SearchDepth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            other => Err(DomainError::invalid_argument(
                "search_depth",
                format!("unknown depth '{}'", other),
            )),
        }
    }
}

/// Search category understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTopic {
    #[default]
    General,
    News,
}

impl SearchTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTopic::General => "general",
            SearchTopic::News => "news",
        }
    }
}

impl FromStr for SearchTopic {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(SearchTopic::General),
            "news" => Ok(SearchTopic::News),
            other => Err(DomainError::invalid_argument(
                "topic",
                format!("unknown topic '{}'", other),
            )),
        }
    }
}

/// Input accepted by the agent-facing search tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchToolInput {
    /// The query that will be searched for on the internet.
    pub query: String,
    /// Always [`FIXED_MAX_RESULTS`].
    pub max_results: u32,
    /// Always [`SearchDepth::Basic`].
    pub search_depth: SearchDepth,
    /// Always `false`.
    pub include_answer: bool,
    /// Optional list of domains to constrain the search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
}

impl SearchToolInput {
    /// Create an input for `query` with the pinned defaults.
    pub fn new(query: impl Into<String>) -> Result<Self, DomainError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(DomainError::invalid_argument("query", "cannot be blank"));
        }
        Ok(Self {
            query,
            max_results: FIXED_MAX_RESULTS,
            search_depth: SearchDepth::Basic,
            include_answer: false,
            include_domains: None,
        })
    }

    pub fn with_domains(mut self, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_domains = normalize_domains(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Extract a typed input from a raw tool call.
    ///
    /// Pinned fields may be omitted or set to their single accepted value.
    pub fn from_call(call: &ToolCall) -> Result<Self, DomainError> {
        let query = match call.arguments.get("query") {
            Some(serde_json::Value::String(q)) => q.clone(),
            Some(other) if !other.is_null() => {
                return Err(DomainError::invalid_argument(
                    "query",
                    format!("expected string, got {}", other),
                ));
            }
            _ => {
                return Err(DomainError::invalid_argument("query", "is required"));
            }
        };

        let mut input = Self::new(query)?;

        if let Some(value) = present(call, "max_results")
            && value.as_u64() != Some(u64::from(FIXED_MAX_RESULTS))
        {
            return Err(DomainError::invalid_argument(
                "max_results",
                format!("fixed to {}, got {}", FIXED_MAX_RESULTS, value),
            ));
        }

        if let Some(value) = present(call, "search_depth")
            && value.as_str() != Some(SearchDepth::Basic.as_str())
        {
            return Err(DomainError::invalid_argument(
                "search_depth",
                format!("fixed to \"basic\", got {}", value),
            ));
        }

        if let Some(value) = present(call, "include_answer")
            && value.as_bool() != Some(false)
        {
            return Err(DomainError::invalid_argument(
                "include_answer",
                format!("fixed to false, got {}", value),
            ));
        }

        if let Some(value) = present(call, "include_domains") {
            let Some(items) = value.as_array() else {
                return Err(DomainError::invalid_argument(
                    "include_domains",
                    format!("expected a list of strings, got {}", value),
                ));
            };
            let mut domains = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(domain) => domains.push(domain.to_string()),
                    None => {
                        return Err(DomainError::invalid_argument(
                            "include_domains",
                            format!("expected a string entry, got {}", item),
                        ));
                    }
                }
            }
            input.include_domains = normalize_domains(domains);
        }

        Ok(input)
    }

    /// Widen into the provider request.
    pub fn into_request(self) -> SearchRequest {
        SearchRequest {
            query: self.query,
            max_results: self.max_results,
            search_depth: self.search_depth,
            topic: SearchTopic::General,
            include_answer: self.include_answer,
            include_domains: self.include_domains,
            extra: serde_json::Map::new(),
        }
    }
}

/// A fully specified search request sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub search_depth: SearchDepth,
    pub topic: SearchTopic,
    pub include_answer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    /// Provider-specific arguments, applied last.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Result<Self, DomainError> {
        Ok(SearchToolInput::new(query)?.into_request())
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_topic(mut self, topic: SearchTopic) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_answer(mut self, include_answer: bool) -> Self {
        self.include_answer = include_answer;
        self
    }

    pub fn with_domains(mut self, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include_domains = normalize_domains(domains.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Images are never requested; results are text only.
    pub fn include_images(&self) -> bool {
        false
    }

    /// Raw page content is never requested.
    pub fn include_raw_content(&self) -> bool {
        false
    }

    /// Re-check the invariants a hand-built request may have broken.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.query.trim().is_empty() {
            return Err(DomainError::invalid_argument("query", "cannot be blank"));
        }
        if self.max_results == 0 {
            return Err(DomainError::invalid_argument(
                "max_results",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn present<'a>(call: &'a ToolCall, key: &str) -> Option<&'a serde_json::Value> {
    call.arguments.get(key).filter(|v| !v.is_null())
}

fn normalize_domains(domains: Vec<String>) -> Option<Vec<String>> {
    let domains: Vec<String> = domains
        .into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if domains.is_empty() { None } else { Some(domains) }
}
