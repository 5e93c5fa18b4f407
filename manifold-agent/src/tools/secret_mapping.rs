//! `add_secret_mapping`: ExternalSecret data entry for an existing namespace.

use serde::Deserialize;
use serde_json::{json, Value};

use manifold_renderer::SecretMappingContext;

use crate::error::AgentError;
use crate::tool::{Tool, ToolContext};

pub const EXTERNAL_SECRET_FILE: &str = "external-secret.yaml";

#[derive(Debug, Deserialize)]
struct MappingParams {
    app_name: String,
    secret_key: String,
    aws_secret_path: String,
    #[serde(default)]
    property: Option<String>,
}

/// Renders an ExternalSecret `spec.data` entry. Never edits the file.
pub struct AddSecretMapping;

impl Tool for AddSecretMapping {
    fn name(&self) -> &'static str {
        "add_secret_mapping"
    }

    fn description(&self) -> &'static str {
        "Add a new AWS secret mapping to an existing namespace."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "app_name": {"type": "string", "description": "Target namespace"},
                "secret_key": {"type": "string", "description": "Environment variable name"},
                "aws_secret_path": {"type": "string", "description": "AWS Secrets Manager path"},
                "property": {"type": "string", "description": "JSON property in the secret"}
            },
            "required": ["app_name", "secret_key", "aws_secret_path"]
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: MappingParams = serde_json::from_value(input)?;
        let file = ctx
            .layout
            .namespace_dir(&params.app_name)
            .ok_or_else(|| AgentError::InvalidName(params.app_name.clone()))?
            .join(EXTERNAL_SECRET_FILE);
        if !file.is_file() {
            return Ok(json!({
                "error": format!(
                    "No {EXTERNAL_SECRET_FILE} found for '{}'. Enable secrets first.",
                    params.app_name
                )
            }));
        }

        let mapping = ctx.renderer.render_secret_mapping(&SecretMappingContext {
            secret_key: params.secret_key,
            remote_key: params.aws_secret_path,
            property: params.property.filter(|p| !p.is_empty()),
        })?;
        let file = file.display().to_string();
        Ok(json!({
            "success": true,
            "file": file,
            "mapping_to_add": mapping,
            "instructions": [
                format!("Add the following to {file} under spec.data:"),
                mapping,
            ],
        }))
    }
}
