use super::{tool::ToolRegistry, Tool, WebSearchTool};
use crate::{PlannerError, Result};
use serde_json::Value;

/// Factory for declaring tools to the model and executing its calls
#[derive(Debug)]
pub struct FunctionFactory {
    registry: ToolRegistry,
}

impl FunctionFactory {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    /// Factory holding the planner's only tool, `perform_web_search`
    pub fn with_web_search() -> Self {
        let mut factory = Self::new();
        factory.register_tool(WebSearchTool::new());
        factory
    }

    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.register(tool);
    }

    /// Execute a function call by name
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| PlannerError::ToolNotFound(function_name.to_string()))?;

        tool.execute(parameters).await
    }

    /// Function declarations to advertise to the model
    pub fn function_declarations(&self) -> Vec<Value> {
        self.registry.to_function_declarations()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }
}

impl Default for FunctionFactory {
    fn default() -> Self {
        Self::with_web_search()
    }
}
