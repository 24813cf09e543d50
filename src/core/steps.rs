use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single step in a planning exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExchangeStep {
    /// Directive prompt sent to the model
    Task { content: String },
    /// Tool call requested by the model
    Action { tool_name: String, arguments: Value },
    /// Result of a tool execution fed back to the model
    Observation { tool_name: String, result: String },
    /// Raw text of the model's final reply
    FinalAnswer { text: String },
}

impl ExchangeStep {
    /// Get a human-readable description of the step
    pub fn describe(&self) -> String {
        match self {
            ExchangeStep::Task { content } => format!("🧭 Task: {}", content.trim()),
            ExchangeStep::Action {
                tool_name,
                arguments,
            } => format!("🔧 Action: {}({})", tool_name, arguments),
            ExchangeStep::Observation { tool_name, result } => {
                format!("👁 Observation from {}: {}", tool_name, result)
            }
            ExchangeStep::FinalAnswer { text } => format!("✅ Final Answer: {}", text),
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, ExchangeStep::Action { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_action() {
        let step = ExchangeStep::Action {
            tool_name: "perform_web_search".to_string(),
            arguments: json!({"query": "ramen"}),
        };
        assert_eq!(
            step.describe(),
            "🔧 Action: perform_web_search({\"query\":\"ramen\"})"
        );
        assert!(step.is_action());
    }

    #[test]
    fn test_serialized_tag() {
        let step = ExchangeStep::FinalAnswer {
            text: "{}".to_string(),
        };
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["type"], "final_answer");
    }
}
