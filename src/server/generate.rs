use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{error, info};

use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::types::itinerary::{Itinerary, ItineraryRequest};

/// `POST /generate`: run one planning exchange for the request.
#[tracing::instrument(skip_all)]
pub(crate) async fn generate_itinerary(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ItineraryRequest>,
) -> Result<Json<Itinerary>, ApiError> {
    match state.planner.plan(&request).await {
        Ok(outcome) => {
            info!(
                target: "trip_planner::http",
                title = %outcome.itinerary.title,
                days = outcome.itinerary.days.len(),
                tool_rounds = outcome.tool_rounds,
                duration_ms = outcome.duration.as_millis() as u64,
                "itinerary generated"
            );
            Ok(Json(outcome.itinerary))
        }
        Err(err) => {
            error!(
                target: "trip_planner::http",
                code = err.error_code(),
                error = %err,
                "An error occurred while generating itinerary"
            );
            Err(ApiError::from(err))
        }
    }
}
