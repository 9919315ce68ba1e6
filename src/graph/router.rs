//! Query classification via the language model

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use tracing::warn;

use crate::llm::prompts::build_classification_prompt;
use crate::llm::LanguageModel;

/// Outcome of classifying one query.
///
/// A failed model call or an unparseable reply never propagates: the
/// decision falls back to the retrieval branch and carries the failure
/// message so the routing node can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub is_weather: bool,
    pub location: Option<String>,
    pub parse_error: Option<String>,
}

impl RouteDecision {
    fn fallback(message: String) -> Self {
        Self {
            is_weather: false,
            location: None,
            parse_error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Classification {
    #[serde(default)]
    is_weather: bool,
    #[serde(default)]
    location: Option<String>,
}

/// Classifies queries as weather-related (with an extracted location) or not
pub struct QueryRouter {
    llm: Arc<dyn LanguageModel>,
}

impl QueryRouter {
    /// Create a new query router
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Classify a query with a single model call. There is no retry on a
    /// malformed reply; retrying a non-deterministic generator risks an
    /// unbounded loop for no guaranteed improvement.
    pub async fn classify(&self, query: &str) -> RouteDecision {
        let prompt = build_classification_prompt(query);

        let raw = match self.llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Classification call failed: {}", e);
                return RouteDecision::fallback(format!("Error classifying query: {e}"));
            }
        };

        match parse_classification(&raw) {
            Ok(classification) => {
                debug!(
                    "Query classified: is_weather={}, location={:?}",
                    classification.is_weather, classification.location
                );
                RouteDecision {
                    is_weather: classification.is_weather,
                    location: classification.location,
                    parse_error: None,
                }
            }
            Err(e) => {
                warn!("Failed to parse classification response: {}", e);
                RouteDecision::fallback("Error parsing JSON response".to_string())
            }
        }
    }
}

/// Strip markdown code-fence markers the model may wrap its JSON in
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

fn parse_classification(raw: &str) -> serde_json::Result<Classification> {
    serde_json::from_str(strip_code_fences(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let c = parse_classification(r#"{"is_weather": true, "location": "London"}"#).unwrap();
        assert!(c.is_weather);
        assert_eq!(c.location.as_deref(), Some("London"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"is_weather\": true, \"location\": \"Tokyo\"}\n```";
        let c = parse_classification(raw).unwrap();
        assert!(c.is_weather);
        assert_eq!(c.location.as_deref(), Some("Tokyo"));
    }

    #[test]
    fn test_parse_fence_without_language_tag() {
        let raw = "```\n{\"is_weather\": false, \"location\": null}\n```";
        let c = parse_classification(raw).unwrap();
        assert!(!c.is_weather);
        assert!(c.location.is_none());
    }

    #[test]
    fn test_parse_null_location() {
        let c = parse_classification(r#"{"is_weather": false, "location": null}"#).unwrap();
        assert!(!c.is_weather);
        assert!(c.location.is_none());
    }

    #[test]
    fn test_missing_fields_default_to_retrieval() {
        let c = parse_classification("{}").unwrap();
        assert!(!c.is_weather);
        assert!(c.location.is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(parse_classification("the weather is nice today").is_err());
        assert!(parse_classification("```json\nnot json\n```").is_err());
    }
}
