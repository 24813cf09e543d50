//! The single-request exchange with the model, as an explicit state machine.
//!
//! ```text
//! AwaitingModel -> CheckingToolCall -> ValidatingOutput -> Done | Failed
//!                        |                   ^
//!                        v                   |
//!                  ExecutingTool -> AwaitingModelAfterTool
//! ```
//!
//! At most one tool round is performed. A reply that asks for a tool after
//! that round is a failure, not another iteration.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    core::{
        steps::ExchangeStep,
        tool_call::{ToolCall, ToolExecution, ToolOutput},
    },
    error::{PlannerError, Result},
    services::model::{ChatSession, ModelReply},
    tools::{FunctionFactory, WEB_SEARCH_TOOL_NAME},
    types::{
        itinerary::Itinerary,
        response::parse_completion,
        result::{PlanOutcome, TokenUsage},
    },
};

pub const MAX_TOOL_ROUNDS: usize = 1;

#[derive(Debug)]
pub(crate) enum ExchangeState {
    AwaitingModel,
    CheckingToolCall(ModelReply),
    ExecutingTool(ToolCall),
    AwaitingModelAfterTool(ToolOutput),
    ValidatingOutput(ModelReply),
    Done(Itinerary),
    Failed(PlannerError),
}

impl ExchangeState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            ExchangeState::AwaitingModel => "awaiting_model",
            ExchangeState::CheckingToolCall(_) => "checking_tool_call",
            ExchangeState::ExecutingTool(_) => "executing_tool",
            ExchangeState::AwaitingModelAfterTool(_) => "awaiting_model_after_tool",
            ExchangeState::ValidatingOutput(_) => "validating_output",
            ExchangeState::Done(_) => "done",
            ExchangeState::Failed(_) => "failed",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, ExchangeState::Done(_) | ExchangeState::Failed(_))
    }
}

/// Drives one prompt through the model, the optional search round and
/// schema validation.
pub struct Exchange<'a> {
    session: Box<dyn ChatSession>,
    tools: &'a FunctionFactory,
    prompt: String,
    steps: Vec<ExchangeStep>,
    tool_rounds: usize,
    tokens: Option<TokenUsage>,
}

impl<'a> Exchange<'a> {
    pub fn new(session: Box<dyn ChatSession>, tools: &'a FunctionFactory, prompt: String) -> Self {
        Self {
            session,
            tools,
            prompt,
            steps: Vec::new(),
            tool_rounds: 0,
            tokens: None,
        }
    }

    pub async fn run(mut self) -> Result<PlanOutcome> {
        let start_time = Instant::now();
        let mut state = ExchangeState::AwaitingModel;

        while !state.is_terminal() {
            let from = state.name();
            state = self.advance(state).await;
            debug!(target: "trip_planner::exchange", from, to = state.name());
        }

        match state {
            ExchangeState::Done(itinerary) => Ok(PlanOutcome {
                itinerary,
                steps: self.steps,
                tool_rounds: self.tool_rounds,
                tokens: self.tokens,
                duration: start_time.elapsed(),
            }),
            ExchangeState::Failed(err) => {
                warn!(
                    target: "trip_planner::exchange",
                    code = err.error_code(),
                    error = %err,
                    tool_rounds = self.tool_rounds,
                    "exchange failed"
                );
                Err(err)
            }
            other => Err(PlannerError::ToolInvocation(format!(
                "exchange stopped in non-terminal state `{}`",
                other.name()
            ))),
        }
    }

    async fn advance(&mut self, state: ExchangeState) -> ExchangeState {
        match state {
            ExchangeState::AwaitingModel => {
                self.record(ExchangeStep::Task {
                    content: self.prompt.clone(),
                });
                match self.session.send_message(&self.prompt).await {
                    Ok(reply) => {
                        self.track_usage(&reply);
                        ExchangeState::CheckingToolCall(reply)
                    }
                    Err(err) => ExchangeState::Failed(err),
                }
            }
            ExchangeState::CheckingToolCall(reply) => match reply.first_tool_call() {
                Some(call) => ExchangeState::ExecutingTool(call),
                None => ExchangeState::ValidatingOutput(reply),
            },
            ExchangeState::ExecutingTool(call) => match self.execute_tool(call).await {
                Ok(output) => ExchangeState::AwaitingModelAfterTool(output),
                Err(err) => ExchangeState::Failed(err),
            },
            ExchangeState::AwaitingModelAfterTool(output) => {
                match self.session.send_tool_result(&output).await {
                    Ok(reply) => {
                        self.track_usage(&reply);
                        ExchangeState::ValidatingOutput(reply)
                    }
                    Err(err) => ExchangeState::Failed(err),
                }
            }
            ExchangeState::ValidatingOutput(reply) => match self.validate(&reply) {
                Ok(itinerary) => ExchangeState::Done(itinerary),
                Err(err) => ExchangeState::Failed(err),
            },
            terminal @ (ExchangeState::Done(_) | ExchangeState::Failed(_)) => terminal,
        }
    }

    async fn execute_tool(&mut self, call: ToolCall) -> Result<ToolOutput> {
        if self.tool_rounds >= MAX_TOOL_ROUNDS {
            return Err(PlannerError::ToolInvocation(format!(
                "tool round limit of {} reached",
                MAX_TOOL_ROUNDS
            )));
        }

        if call.name != WEB_SEARCH_TOOL_NAME {
            return Err(PlannerError::ToolNotFound(call.name));
        }

        self.record(ExchangeStep::Action {
            tool_name: call.name.clone(),
            arguments: call.arguments.clone(),
        });

        let execution = ToolExecution::start(call.clone());
        let value = self
            .tools
            .execute_function(&call.name, call.arguments)
            .await?;
        let output = execution.complete(value);
        self.tool_rounds += 1;

        self.record(ExchangeStep::Observation {
            tool_name: output.tool_name.clone(),
            result: output.as_string(),
        });

        Ok(output)
    }

    fn validate(&mut self, reply: &ModelReply) -> Result<Itinerary> {
        if reply.requests_tool() {
            return Err(PlannerError::ToolInvocation(format!(
                "model requested a tool call after {} tool round(s); only {} is supported",
                self.tool_rounds, MAX_TOOL_ROUNDS
            )));
        }

        let text = reply.text()?;
        self.record(ExchangeStep::FinalAnswer { text: text.clone() });
        parse_completion::<Itinerary>(&text)
    }

    fn record(&mut self, step: ExchangeStep) {
        info!(target: "trip_planner::steps", "{}", step.describe());
        self.steps.push(step);
    }

    fn track_usage(&mut self, reply: &ModelReply) {
        self.tokens = TokenUsage::accumulate(self.tokens, reply.usage());
    }
}
