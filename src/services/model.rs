use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    core::tool_call::{ToolCall, ToolOutput},
    error::{PlannerError, Result},
    types::result::TokenUsage,
};

/// One reply from the model: the content parts of its first candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    parts: Vec<Value>,
    usage: Option<TokenUsage>,
}

impl ModelReply {
    pub fn new(parts: Vec<Value>) -> Self {
        Self { parts, usage: None }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![json!({ "text": text.into() })])
    }

    pub fn from_tool_call(call: &ToolCall) -> Self {
        Self::new(vec![call.to_gemini_part()])
    }

    pub fn with_usage(mut self, usage: Option<TokenUsage>) -> Self {
        self.usage = usage;
        self
    }

    pub fn parts(&self) -> &[Value] {
        &self.parts
    }

    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }

    /// Tool call carried by the first content part, if any.
    pub fn first_tool_call(&self) -> Option<ToolCall> {
        self.parts.first().and_then(ToolCall::from_gemini_part)
    }

    /// Whether any part of the reply is a function call
    pub fn requests_tool(&self) -> bool {
        self.parts
            .iter()
            .any(|part| part.get("functionCall").is_some())
    }

    /// Concatenated text of all text parts.
    pub fn text(&self) -> Result<String> {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
            .collect();

        if texts.is_empty() {
            return Err(PlannerError::SchemaValidation(
                "model reply contained no text".to_string(),
            ));
        }

        Ok(texts.concat())
    }
}

/// A stateful multi-turn exchange with the model, scoped to one request.
#[async_trait]
pub trait ChatSession: Send {
    /// Send a user message and wait for the reply
    async fn send_message(&mut self, text: &str) -> Result<ModelReply>;

    /// Return a tool result to the model and wait for the reply
    async fn send_tool_result(&mut self, output: &ToolOutput) -> Result<ModelReply>;
}

/// A hosted model that can open chat sessions with declared tools.
pub trait ChatModel: Send + Sync + std::fmt::Debug {
    /// Open a fresh session; `function_declarations` describe the callable tools
    fn start_chat(&self, function_declarations: Vec<Value>) -> Result<Box<dyn ChatSession>>;
}
