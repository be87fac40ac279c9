//! Tool registry: name-keyed dispatch and schema publication.

use std::sync::Arc;

use tracing::debug;

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::ToolDefinition;
use crate::runtime::ToolCallRequest;

/// Registration-ordered collection of tools.
///
/// Dispatch is a total function: unknown tool names and handler failures are
/// converted to descriptive text observations, never errors — the transcript
/// is the model's only feedback channel, and a failed tool call is something
/// the model can read and correct on the next iteration.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Registration order fixes the schema listing order.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// The declarative schema list published on every backend request.
    ///
    /// The listing is static for the life of the registry: same tools, same
    /// order, same bytes on every call.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Invoke one tool call and return its text observation.
    pub async fn dispatch(&self, call: &ToolCallRequest) -> String {
        let Some(tool) = self.get(&call.name) else {
            debug!(tool = %call.name, "unknown tool requested");
            return format!("Unknown tool: {}", call.name);
        };

        let args = ToolArguments::new(call.arguments.clone());
        match tool.execute(&args).await {
            Ok(text) => text,
            Err(e) => {
                debug!(tool = %call.name, error = %e, "tool returned error, folding to text");
                format!("Error executing {}: {e}", call.name)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
