pub(crate) mod conversation;
pub mod orchestrator;
pub mod planner;
pub mod steps;
pub mod tool_call;

pub use crate::types::result::{PlanOutcome, TokenUsage};
pub use orchestrator::{Exchange, MAX_TOOL_ROUNDS};
pub use planner::Planner;
pub use steps::ExchangeStep;
pub use tool_call::{ToolCall, ToolExecution, ToolOutput};
