//! Tool registry for managing available tools

use crate::Tool;
use std::sync::Arc;
use tracing::debug;

/// Registry for managing tools
///
/// Tools are kept in registration order so the model always sees the same
/// tool list. The registry is filled once at startup and read afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// A tool with the same name replaces the earlier one in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        debug!(tool_name = tool.name(), "Registering tool");
        match self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Builder-style registration
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List all registered tools in registration order
    pub fn list_tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Names of all registered tools in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct StaticTool {
        name: &'static str,
        output: &'static str,
    }

    #[async_trait]
    impl Tool for StaticTool {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(json!(self.output))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Returns a fixed string"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
    }

    #[test]
    fn test_registration_order() {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(StaticTool { name: "lookup_ticker", output: "CRM" }))
            .with_tool(Arc::new(StaticTool { name: "get_quote", output: "250" }));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["lookup_ticker", "get_quote"]);
        assert!(registry.get("get_quote").is_some());
        assert!(registry.get("get_weather").is_none());
    }

    #[tokio::test]
    async fn test_replace_keeps_position() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StaticTool { name: "lookup_ticker", output: "old" }));
        registry.register(Arc::new(StaticTool { name: "get_quote", output: "250" }));
        registry.register(Arc::new(StaticTool { name: "lookup_ticker", output: "new" }));

        assert_eq!(registry.names(), vec!["lookup_ticker", "get_quote"]);
        let tool = registry.get("lookup_ticker").unwrap();
        assert_eq!(tool.execute(json!({})).await.unwrap(), json!("new"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.list_tools().is_empty());
    }
}
