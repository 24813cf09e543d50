#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use trip_planner::{ChatModel, ChatSession, ModelReply, PlannerError, ToolCall, ToolOutput};

pub const KYOTO_ITINERARY: &str = r#"{
  "title": "Kyoto 2-Day Trip",
  "startDate": "2025-04-10",
  "endDate": "2025-04-11",
  "days": [
    {
      "date": "2025-04-10",
      "summary": "Fushimi Inari & Gion",
      "items": [
        { "time": "09:00", "activity": "Fushimi Inari Shrine", "location": "34.9671,135.7727" },
        { "time": "19:00", "activity": "Dinner at Kikunoi Roan", "location": "35.0037,135.7788" }
      ]
    },
    {
      "date": "2025-04-11",
      "summary": "Arashiyama",
      "items": [
        { "time": "08:30", "activity": "Bamboo Grove", "location": "35.0170,135.6713" }
      ]
    }
  ]
}"#;

/// What the fake model replies with, in order, across all sessions.
#[derive(Debug, Clone)]
pub enum Scripted {
    Text(String),
    Call(String, Value),
    TransportError(String),
}

impl Scripted {
    pub fn text(text: &str) -> Self {
        Scripted::Text(text.to_string())
    }

    pub fn search(query: &str) -> Self {
        Scripted::Call("perform_web_search".to_string(), json!({ "query": query }))
    }
}

/// Everything the orchestrator sent to the fake model.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Started(Vec<Value>),
    Message(String),
    ToolResult(ToolOutput),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            sent: Arc::default(),
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn tool_results(&self) -> Vec<ToolOutput> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::ToolResult(output) => Some(output),
                _ => None,
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl ChatModel for ScriptedModel {
    fn start_chat(
        &self,
        function_declarations: Vec<Value>,
    ) -> trip_planner::Result<Box<dyn ChatSession>> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Started(function_declarations));
        Ok(Box::new(ScriptedSession {
            model: self.clone(),
        }))
    }
}

struct ScriptedSession {
    model: ScriptedModel,
}

impl ScriptedSession {
    fn reply(&self, sent: Sent) -> trip_planner::Result<ModelReply> {
        self.model.sent.lock().unwrap().push(sent);
        let next = self.model.replies.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(ModelReply::from_text(text)),
            Some(Scripted::Call(name, args)) => {
                Ok(ModelReply::from_tool_call(&ToolCall::new(name, args)))
            }
            Some(Scripted::TransportError(message)) => Err(PlannerError::ModelTransport(message)),
            None => Err(PlannerError::ModelTransport("script exhausted".to_string())),
        }
    }
}

#[async_trait]
impl ChatSession for ScriptedSession {
    async fn send_message(&mut self, text: &str) -> trip_planner::Result<ModelReply> {
        self.reply(Sent::Message(text.to_string()))
    }

    async fn send_tool_result(&mut self, output: &ToolOutput) -> trip_planner::Result<ModelReply> {
        self.reply(Sent::ToolResult(output.clone()))
    }
}
