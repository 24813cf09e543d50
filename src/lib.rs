//! trip-planner: turn natural-language trip requests into validated itineraries
//!
//! A [`Planner`] sends one directive prompt to a hosted model, lets the model
//! call the `perform_web_search` tool at most once, and validates the final
//! reply against the [`Itinerary`] schema. The [`server`] module exposes it as
//! `POST /generate`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_planner::{ItineraryRequest, Planner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = Planner::from_env()?;
//!     let itinerary = planner
//!         .generate(&ItineraryRequest::new("Plan 2 days in Kyoto"))
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod schemas;
pub mod server;
pub mod services;
pub mod tools;
pub mod types;

pub use config::Config;
pub use core::{Exchange, ExchangeStep, PlanOutcome, Planner, TokenUsage, ToolCall, ToolOutput};
pub use error::{PlannerError, Result};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{build_itinerary_prompt, ChatModel, ChatSession, GeminiClient, ModelReply};
pub use tools::{perform_web_search, FunctionFactory, SearchBackend, Tool, WebSearchTool};
pub use types::{Day, Itinerary, ItineraryItem, ItineraryRequest};

#[cfg(feature = "cli")]
pub mod cli;
