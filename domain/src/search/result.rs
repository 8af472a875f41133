//! Strongly-typed search output.

use serde::{Deserialize, Serialize};

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResult {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: f64,
}

/// Result object returned by the search tool.
///
/// `total_results` always equals `results.len()`; construct through
/// [`SearchOutput::new`] to keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<ParsedResult>,
    pub total_results: usize,
}

impl SearchOutput {
    pub fn new(query: impl Into<String>, results: Vec<ParsedResult>) -> Self {
        let total_results = results.len();
        Self {
            query: query.into(),
            results,
            total_results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Highest-scored result, if any.
    pub fn best(&self) -> Option<&ParsedResult> {
        self.results
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Score given to the result at `index` when the provider sends none.
pub fn positional_score(index: usize) -> f64 {
    (1.0 - 0.1 * index as f64).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, score: f64) -> ParsedResult {
        ParsedResult {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            content: String::new(),
            score,
        }
    }

    #[test]
    fn test_total_results_tracks_len() {
        let output = SearchOutput::new("q", vec![hit("a", 0.5), hit("b", 0.9)]);
        assert_eq!(output.total_results, 2);
        assert_eq!(output.best().unwrap().title, "b");
    }

    #[test]
    fn test_empty_output() {
        let output = SearchOutput::new("q", Vec::new());
        assert!(output.is_empty());
        assert!(output.best().is_none());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({"query": "q", "results": [], "total_results": 0})
        );
    }

    #[test]
    fn test_positional_score() {
        assert_eq!(positional_score(0), 1.0);
        assert!((positional_score(4) - 0.6).abs() < 1e-9);
        assert_eq!(positional_score(12), 0.0);
    }
}
