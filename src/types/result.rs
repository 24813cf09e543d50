use crate::{core::steps::ExchangeStep, types::itinerary::Itinerary};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a completed planning exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// The validated itinerary
    pub itinerary: Itinerary,
    /// Every step recorded during the exchange, in order
    pub steps: Vec<ExchangeStep>,
    /// Number of tool rounds performed (zero or one)
    pub tool_rounds: usize,
    /// Summed token usage across model calls, when the provider reported it
    pub tokens: Option<TokenUsage>,
    /// Wall-clock duration of the exchange
    pub duration: Duration,
}

/// Token usage information reported by the model provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn accumulate(total: Option<TokenUsage>, next: Option<TokenUsage>) -> Option<TokenUsage> {
        match (total, next) {
            (None, None) => None,
            (Some(usage), None) | (None, Some(usage)) => Some(usage),
            (Some(a), Some(b)) => Some(TokenUsage {
                prompt_tokens: a.prompt_tokens + b.prompt_tokens,
                completion_tokens: a.completion_tokens + b.completion_tokens,
                total_tokens: a.total_tokens + b.total_tokens,
            }),
        }
    }
}

impl PlanOutcome {
    /// Generate a human-readable replay of the exchange
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Planner Exchange Trace ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Tool rounds: {}", self.tool_rounds));

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push(format!(
            "--- Itinerary: {} ({} days) ---",
            self.itinerary.title,
            self.itinerary.days.len()
        ));

        lines.join("\n")
    }

    pub fn used_search(&self) -> bool {
        self.tool_rounds > 0
    }
}
