use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model transport error: {0}")]
    ModelTransport(String),

    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    #[error("Tool invocation error: {0}")]
    ToolInvocation(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::ModelTransport(format!("model call timed out: {err}"))
        } else {
            PlannerError::ModelTransport(format!("HTTP request failed: {err}"))
        }
    }
}

impl PlannerError {
    /// Get the error code for structured logs
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::ModelTransport(_) => "MODEL_TRANSPORT_ERROR",
            PlannerError::SchemaValidation(_) => "SCHEMA_VALIDATION_ERROR",
            PlannerError::ToolInvocation(_) => "TOOL_INVOCATION_ERROR",
            PlannerError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the failure happened while talking to the model provider
    pub fn is_transport(&self) -> bool {
        matches!(self, PlannerError::ModelTransport(_))
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string()
            }
        })
    }
}
