use serde_json::{Map, Value};

use crate::{schemas::CompletionSchema, types::itinerary::Itinerary};

/// Token embedded in place of the previous itinerary when there is none
pub const NO_PREVIOUS_ITINERARY: &str = "None";

/// Compose the single directive sent as the first message of an exchange.
pub fn build_itinerary_prompt(
    user_prompt: &str,
    current_itinerary: Option<&Map<String, Value>>,
) -> String {
    let previous = match current_itinerary {
        Some(itinerary) if !itinerary.is_empty() => {
            serde_json::to_string(itinerary).unwrap_or_else(|_| NO_PREVIOUS_ITINERARY.to_string())
        }
        _ => NO_PREVIOUS_ITINERARY.to_string(),
    };

    let schema = Itinerary::schema();
    let required = schema.required_fields().join(", ");

    format!(
        r#"You are an expert travel agent. Your task is to generate a detailed, day-by-day travel itinerary.
The user's request is: "{user_prompt}"

If a previous itinerary is provided, modify it based on the user's request.
Previous itinerary: {previous}

You have access to a web search tool to find real-time information like popular restaurants or opening hours. Use it if necessary.

You **must** respond with only a valid JSON object that conforms to the `{name}` schema (required fields: {required}; each day has date, summary and items; each item has time, activity and location as "lat,lng").
Do not include any other text, explanations, or markdown formatting like ```json.
Your response must be the raw JSON object."#,
        name = schema.schema_name(),
    )
}
