use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to execute
    pub name: String,
    /// Arguments to pass to the tool
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Parse a tool call from a Gemini content part (`{"functionCall": {...}}`)
    pub fn from_gemini_part(part: &Value) -> Option<Self> {
        let call = part.get("functionCall")?;
        let name = call.get("name")?.as_str()?.to_string();
        let arguments = call.get("args").cloned().unwrap_or(Value::Null);

        Some(Self { name, arguments })
    }

    /// Convert to a Gemini content part
    pub fn to_gemini_part(&self) -> Value {
        json!({
            "functionCall": {
                "name": self.name,
                "args": self.arguments
            }
        })
    }

    /// Get a human-readable description
    pub fn describe(&self) -> String {
        format!("{}({})", self.name, self.arguments)
    }
}

/// Output of a tool execution, ready to be returned to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The tool name that was executed
    pub tool_name: String,
    /// The output/result from the tool
    pub output: Value,
    /// Execution duration in milliseconds
    pub duration_ms: Option<u128>,
}

impl ToolOutput {
    pub fn new(tool_name: impl Into<String>, output: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            output,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(duration.as_millis());
        self
    }

    /// Get the output as a string for the response payload
    pub fn as_string(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// The `response` object of the function response: `{"content": <output>}`
    pub fn response_payload(&self) -> Value {
        json!({ "content": self.as_string() })
    }

    /// Convert to a Gemini `functionResponse` content part
    pub fn to_gemini_part(&self) -> Value {
        json!({
            "functionResponse": {
                "name": self.tool_name,
                "response": self.response_payload()
            }
        })
    }
}

/// Tracks the execution of a tool call with timing information
#[derive(Debug)]
pub struct ToolExecution {
    pub tool_call: ToolCall,
    start_time: Instant,
}

impl ToolExecution {
    pub fn start(tool_call: ToolCall) -> Self {
        Self {
            tool_call,
            start_time: Instant::now(),
        }
    }

    /// Complete the execution and get the output with timing
    pub fn complete(self, output: Value) -> ToolOutput {
        let duration = self.start_time.elapsed();
        ToolOutput::new(self.tool_call.name, output).with_duration(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_from_gemini() {
        let part = json!({
            "functionCall": {
                "name": "perform_web_search",
                "args": { "query": "restaurants in Kyoto" }
            }
        });

        let call = ToolCall::from_gemini_part(&part).unwrap();
        assert_eq!(call.name, "perform_web_search");
        assert_eq!(call.arguments["query"], "restaurants in Kyoto");
        assert_eq!(call.to_gemini_part(), part);
    }

    #[test]
    fn test_text_part_is_not_a_tool_call() {
        assert!(ToolCall::from_gemini_part(&json!({ "text": "hello" })).is_none());
    }

    #[test]
    fn test_call_without_args() {
        let part = json!({ "functionCall": { "name": "perform_web_search" } });
        let call = ToolCall::from_gemini_part(&part).unwrap();
        assert!(call.arguments.is_null());
    }

    #[test]
    fn test_function_response_wraps_string_output() {
        let output = ToolOutput::new("perform_web_search", json!("{\"results\":[]}"));
        assert_eq!(
            output.to_gemini_part(),
            json!({
                "functionResponse": {
                    "name": "perform_web_search",
                    "response": { "content": "{\"results\":[]}" }
                }
            })
        );
    }

    #[test]
    fn test_tool_execution_timing() {
        let call = ToolCall::new("perform_web_search", Value::Null);
        let output = ToolExecution::start(call).complete(json!("result"));
        assert!(output.duration_ms.is_some());
        assert_eq!(output.tool_name, "perform_web_search");
    }
}
