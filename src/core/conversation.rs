use crate::core::tool_call::ToolOutput;
use serde_json::{json, Value};

pub(crate) const USER_ROLE: &str = "user";
pub(crate) const MODEL_ROLE: &str = "model";

/// Ordered `contents` of a chat session in Gemini wire format.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    contents: Vec<Value>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_text(text: &str) -> Value {
        json!({
            "role": USER_ROLE,
            "parts": [{ "text": text }]
        })
    }

    pub fn function_response(output: &ToolOutput) -> Value {
        json!({
            "role": USER_ROLE,
            "parts": [output.to_gemini_part()]
        })
    }

    pub fn model_parts(parts: &[Value]) -> Value {
        json!({
            "role": MODEL_ROLE,
            "parts": parts
        })
    }

    pub fn push_content(&mut self, content: Value) {
        self.contents.push(content);
    }

    /// Contents with `pending` appended, without committing it.
    pub fn with_pending(&self, pending: &Value) -> Vec<Value> {
        let mut contents = self.contents.clone();
        contents.push(pending.clone());
        contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }
}
