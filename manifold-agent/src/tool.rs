//! The tool seam.

use serde::Serialize;
use serde_json::Value;

use manifold_renderer::Renderer;

use crate::error::AgentError;
use crate::layout::RepoLayout;

/// What a tool handler gets to work with.
pub struct ToolContext<'a> {
    pub layout: &'a RepoLayout,
    pub renderer: &'a Renderer,
}

/// One named operation callable by JSON name with a JSON object of parameters.
pub trait Tool: Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema of the accepted parameters.
    fn input_schema(&self) -> Value;

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Serializable tool description for a tool-calling client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}
