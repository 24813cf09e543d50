pub mod itinerary;
pub mod response;
pub mod result;

pub use itinerary::{Day, Itinerary, ItineraryItem, ItineraryRequest};
pub use response::{deserialize_structured_response, parse_completion};
pub use result::{PlanOutcome, TokenUsage};
