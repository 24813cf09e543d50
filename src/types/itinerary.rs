use crate::schemas::{CompletionSchema, SchemaHandle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Incoming trip request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    /// Free-text request from the traveller
    pub prompt: String,
    /// Prior conversation records as sent by the client
    #[serde(default)]
    pub history: Vec<Map<String, Value>>,
    /// Itinerary the traveller wants modified, if any
    #[serde(default)]
    pub current_itinerary: Option<Map<String, Value>>,
}

impl ItineraryRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
            current_itinerary: None,
        }
    }

    pub fn with_current_itinerary(mut self, itinerary: Map<String, Value>) -> Self {
        self.current_itinerary = Some(itinerary);
        self
    }

    /// The previous itinerary, treating an empty object as absent.
    pub fn previous_itinerary(&self) -> Option<&Map<String, Value>> {
        self.current_itinerary.as_ref().filter(|map| !map.is_empty())
    }
}

/// Structured day-by-day itinerary returned by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Title of the trip, e.g. "Kyoto 5-Day Solo Trip"
    pub title: String,
    /// Start date of the trip
    pub start_date: String,
    /// End date of the trip
    pub end_date: String,
    /// Plans for each day in order
    pub days: Vec<Day>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Day {
    /// Date of this day's plan, e.g. "2025-04-10"
    pub date: String,
    /// A short summary for the day, e.g. "Fushimi Inari & Gion"
    pub summary: String,
    /// Timed activities in chronological order
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryItem {
    /// Time of the activity, e.g. "09:00"
    pub time: String,
    /// Description of the activity
    pub activity: String,
    /// GPS coordinates, e.g. "34.9671,135.7727"
    pub location: String,
}

impl CompletionSchema for Itinerary {
    fn schema() -> &'static SchemaHandle {
        static HANDLE: OnceLock<SchemaHandle> = OnceLock::new();
        HANDLE.get_or_init(|| {
            SchemaHandle::from_root_schema::<Self>("Itinerary", schemars::schema_for!(Self))
        })
    }
}
