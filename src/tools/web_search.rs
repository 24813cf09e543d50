use super::Tool;
use serde::{Deserialize, Serialize};
use std::{pin::Pin, sync::Arc};
use tracing::info;

pub const WEB_SEARCH_TOOL_NAME: &str = "perform_web_search";
pub const NO_RESULTS_MARKER: &str = "No real-time information found for this query.";

/// Parameters the model passes to `perform_web_search`
#[derive(Debug, Serialize, Deserialize)]
pub struct WebSearchParams {
    pub query: String,
}

/// Search response handed back to the model as `{"results": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: SearchPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchPayload {
    Hits(Vec<SearchHit>),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub rating: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SearchResults {
    pub fn hits(hits: Vec<SearchHit>) -> Self {
        Self {
            results: SearchPayload::Hits(hits),
        }
    }

    pub fn not_found() -> Self {
        Self {
            results: SearchPayload::NotFound(NO_RESULTS_MARKER.to_string()),
        }
    }
}

/// Source of search results behind `perform_web_search`
pub trait SearchBackend: Send + Sync + std::fmt::Debug {
    fn search(&self, query: &str) -> SearchResults;
}

/// Canned results for demos and tests; no network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleSearchBackend;

impl SearchBackend for SampleSearchBackend {
    fn search(&self, query: &str) -> SearchResults {
        if query.to_lowercase().contains("restaurants in kyoto") {
            return SearchResults::hits(vec![
                SearchHit {
                    name: "Kikunoi Roan".to_string(),
                    rating: 4.5,
                    kind: "Kaiseki".to_string(),
                },
                SearchHit {
                    name: "Gogyo Ramen".to_string(),
                    rating: 4.3,
                    kind: "Ramen".to_string(),
                },
            ]);
        }

        SearchResults::not_found()
    }
}

/// Look up real-time facts and return them JSON-encoded.
pub fn perform_web_search(backend: &dyn SearchBackend, query: &str) -> String {
    info!(target: "trip_planner::search", query = %query, "performing web search");
    let results = backend.search(query);
    // Plain structs with string and float fields always encode
    serde_json::to_string(&results).unwrap_or_else(|_| {
        format!("{{\"results\":{:?}}}", NO_RESULTS_MARKER)
    })
}

/// The `perform_web_search` tool offered to the model
#[derive(Debug, Clone)]
pub struct WebSearchTool {
    backend: Arc<dyn SearchBackend>,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self::with_backend(SampleSearchBackend)
    }

    pub fn with_backend<B: SearchBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        WEB_SEARCH_TOOL_NAME
    }

    fn description(&self) -> &'static str {
        "Performs a web search for real-time information about a location, activity, or restaurant."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query."
                }
            },
            "required": ["query"]
        })
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = Result<serde_json::Value, crate::PlannerError>>
                + Send
                + '_,
        >,
    > {
        Box::pin(async move {
            let params: WebSearchParams =
                serde_path_to_error::deserialize(parameters).map_err(|err| {
                    crate::PlannerError::ToolInvocation(format!(
                        "Invalid arguments for {} at {}: {}",
                        WEB_SEARCH_TOOL_NAME,
                        err.path(),
                        err.inner()
                    ))
                })?;

            Ok(serde_json::Value::String(perform_web_search(
                self.backend.as_ref(),
                &params.query,
            )))
        })
    }
}
