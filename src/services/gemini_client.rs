use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::{conversation::Conversation, tool_call::ToolOutput},
    error::{PlannerError, Result},
    services::model::{ChatModel, ChatSession, ModelReply},
    types::result::TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client; each chat gets its own HTTP client.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| {
            PlannerError::ModelTransport(format!("Failed to build HTTP client: {err}"))
        })
    }
}

impl ChatModel for GeminiClient {
    fn start_chat(&self, function_declarations: Vec<Value>) -> Result<Box<dyn ChatSession>> {
        Ok(Box::new(GeminiChat {
            http: self.http_client()?,
            url: build_generate_url(&self.base_url, &self.model),
            api_key: self.api_key.clone(),
            function_declarations,
            conversation: Conversation::new(),
        }))
    }
}

/// A single chat session. History lives client-side and is resent each turn.
struct GeminiChat {
    http: reqwest::Client,
    url: String,
    api_key: String,
    function_declarations: Vec<Value>,
    conversation: Conversation,
}

impl GeminiChat {
    async fn exchange(&mut self, content: Value) -> Result<ModelReply> {
        let body = GenerateContentRequest::new(self.conversation.with_pending(&content))
            .with_function_declarations(self.function_declarations.clone())
            .into_value();

        let response = self
            .http
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        let response_json: Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(err) if status.is_success() => {
                return Err(PlannerError::ModelTransport(format!(
                    "Failed to parse model response: {err}"
                )))
            }
            Err(_) => Value::Null,
        };

        if !status.is_success() {
            let api_message = api_error_message(&response_json).unwrap_or(response_text);
            return Err(PlannerError::ModelTransport(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        if let Some(message) = api_error_message(&response_json) {
            return Err(PlannerError::ModelTransport(format!("API error: {}", message)));
        }

        let reply = parse_generate_response(&response_json)?;
        debug!(
            target: "trip_planner::model",
            usage = ?reply.usage(),
            parts = reply.parts().len(),
            turns = self.conversation.len() + 1
        );

        self.conversation.push_content(content);
        self.conversation
            .push_content(Conversation::model_parts(reply.parts()));

        Ok(reply)
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send_message(&mut self, text: &str) -> Result<ModelReply> {
        self.exchange(Conversation::user_text(text)).await
    }

    async fn send_tool_result(&mut self, output: &ToolOutput) -> Result<ModelReply> {
        self.exchange(Conversation::function_response(output)).await
    }
}

fn build_generate_url(base_url: &str, model: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    let model = model.trim_start_matches("models/");
    format!("{}/models/{}:generateContent", trimmed, model)
}

fn api_error_message(response: &Value) -> Option<String> {
    let error = response.get("error")?;
    Some(
        error
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string()),
    )
}

/// Extract the first candidate's content parts and usage metadata.
fn parse_generate_response(response: &Value) -> Result<ModelReply> {
    let first_candidate = response
        .get("candidates")
        .and_then(|value| value.as_array())
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| {
            let reason = response
                .get("promptFeedback")
                .and_then(|feedback| feedback.get("blockReason"))
                .and_then(|value| value.as_str())
                .unwrap_or("no candidates returned");
            PlannerError::ModelTransport(format!("Model returned no candidates: {}", reason))
        })?;

    let parts = first_candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .cloned()
        .ok_or_else(|| {
            let finish_reason = first_candidate
                .get("finishReason")
                .and_then(|value| value.as_str())
                .unwrap_or("unknown");
            PlannerError::ModelTransport(format!(
                "Candidate has no content parts (finish reason: {})",
                finish_reason
            ))
        })?;

    let usage = response.get("usageMetadata").and_then(|usage| {
        Some(TokenUsage {
            prompt_tokens: usage.get("promptTokenCount")?.as_u64()? as u32,
            completion_tokens: usage
                .get("candidatesTokenCount")
                .and_then(|value| value.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: usage.get("totalTokenCount")?.as_u64()? as u32,
        })
    });

    Ok(ModelReply::new(parts).with_usage(usage))
}

#[derive(Clone, Debug)]
pub struct GenerateContentRequest {
    contents: Vec<Value>,
    function_declarations: Vec<Value>,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<Value>) -> Self {
        Self {
            contents,
            function_declarations: Vec::new(),
        }
    }

    pub fn with_function_declarations(mut self, declarations: Vec<Value>) -> Self {
        self.function_declarations = declarations;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "contents": self.contents,
        });

        if !self.function_declarations.is_empty() {
            body["tools"] = json!([{ "functionDeclarations": self.function_declarations }]);
        }

        body
    }
}
