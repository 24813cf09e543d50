//! Tools module containing the tool abstraction and the web search tool

pub mod function_factory;
pub mod tool;
pub mod web_search;

pub use function_factory::FunctionFactory;
pub use tool::{Tool, ToolRegistry};
pub use web_search::{
    perform_web_search, SampleSearchBackend, SearchBackend, SearchHit, SearchPayload,
    SearchResults, WebSearchTool, NO_RESULTS_MARKER, WEB_SEARCH_TOOL_NAME,
};
