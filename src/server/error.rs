use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

pub const GENERATION_FAILED: &str = "Failed to generate a valid itinerary.";

/// Error returned by the HTTP layer.
///
/// Serialises as `{ "detail": "<message>" }`. Internal detail stays in the
/// server log.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse {
                detail: detail.into(),
            },
        }
    }

    pub fn generation_failed() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Every planner failure maps to the same generic response.
impl From<PlannerError> for ApiError {
    fn from(_: PlannerError) -> Self {
        Self::generation_failed()
    }
}
