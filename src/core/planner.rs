use std::sync::Arc;

use tracing::debug;

use crate::{
    config::Config,
    core::orchestrator::Exchange,
    error::Result,
    services::{model::ChatModel, prompt::build_itinerary_prompt, GeminiClient},
    tools::{FunctionFactory, SearchBackend, WebSearchTool},
    types::{
        itinerary::{Itinerary, ItineraryRequest},
        result::PlanOutcome,
    },
};

/// Turns trip requests into validated itineraries.
///
/// Cheap to clone; every call to [`Planner::plan`] opens its own chat session.
#[derive(Debug, Clone)]
pub struct Planner {
    model: Arc<dyn ChatModel>,
    function_factory: Arc<FunctionFactory>,
}

impl Planner {
    pub fn new<M: ChatModel + 'static>(model: M) -> Self {
        Self::from_shared(Arc::new(model))
    }

    pub fn from_shared(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            function_factory: Arc::new(FunctionFactory::with_web_search()),
        }
    }

    /// Build a Gemini-backed planner from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiClient::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_timeout(config.request_timeout);
        Self::new(client)
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&Config::from_env()?))
    }

    /// Serve `perform_web_search` from a different backend
    pub fn with_search_backend<B: SearchBackend + 'static>(mut self, backend: B) -> Self {
        let mut factory = FunctionFactory::new();
        factory.register_tool(WebSearchTool::with_backend(backend));
        self.function_factory = Arc::new(factory);
        self
    }

    pub fn function_factory(&self) -> &FunctionFactory {
        &self.function_factory
    }

    /// Run one exchange and return the itinerary together with its trace
    pub async fn plan(&self, request: &ItineraryRequest) -> Result<PlanOutcome> {
        debug!(
            target: "trip_planner::planner",
            history = request.history.len(),
            has_previous = request.previous_itinerary().is_some(),
            "starting exchange"
        );

        let prompt = build_itinerary_prompt(&request.prompt, request.previous_itinerary());
        let session = self
            .model
            .start_chat(self.function_factory.function_declarations())?;

        Exchange::new(session, &self.function_factory, prompt)
            .run()
            .await
    }

    pub async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary> {
        self.plan(request).await.map(|outcome| outcome.itinerary)
    }
}
