//! Name → tool dispatch and error normalisation.

use serde_json::{json, Value};

use manifold_renderer::Renderer;

use crate::layout::RepoLayout;
use crate::tool::{Tool, ToolContext, ToolDefinition};
use crate::tools::TOOLS;

/// Routes tool calls against one repository.
pub struct Dispatcher {
    layout: RepoLayout,
    renderer: Renderer,
}

impl Dispatcher {
    pub fn new(layout: RepoLayout, renderer: Renderer) -> Self {
        Dispatcher { layout, renderer }
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    pub fn tool(name: &str) -> Option<&'static dyn Tool> {
        TOOLS.iter().copied().find(|t| t.name() == name)
    }

    pub fn definitions() -> Vec<ToolDefinition> {
        TOOLS.iter().map(|t| t.definition()).collect()
    }

    /// Run `name` with `input`. Never fails: every problem comes back as
    /// `{"error": "<message>"}`.
    pub fn execute(&self, name: &str, input: Value) -> Value {
        let Some(tool) = Self::tool(name) else {
            tracing::warn!("unknown tool requested: {name}");
            return json!({ "error": format!("Unknown tool: {name}") });
        };

        // A call with no arguments is an empty object.
        let input = if input.is_null() { json!({}) } else { input };

        tracing::info!("executing tool {name}");
        let ctx = ToolContext {
            layout: &self.layout,
            renderer: &self.renderer,
        };
        match tool.execute(&ctx, input) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("tool {name} failed: {err}");
                json!({ "error": err.to_string() })
            }
        }
    }
}
