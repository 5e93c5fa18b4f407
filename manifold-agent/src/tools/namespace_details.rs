//! `get_namespace_details`: files, features and registration of one namespace.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use manifold_detector::{extract_image, staging_registration, yaml_files, NamespaceFeatures};

use crate::error::AgentError;
use crate::tool::{Tool, ToolContext};

#[derive(Debug, Deserialize)]
struct DetailsParams {
    app_name: String,
}

pub struct NamespaceDetails;

impl Tool for NamespaceDetails {
    fn name(&self) -> &'static str {
        "get_namespace_details"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific namespace configuration."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "app_name": {"type": "string", "description": "Name of the namespace to inspect"}
            },
            "required": ["app_name"]
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: DetailsParams = serde_json::from_value(input)?;
        let name = params.app_name;
        let dir = ctx
            .layout
            .namespace_dir(&name)
            .ok_or_else(|| AgentError::InvalidName(name.clone()))?;
        if !dir.is_dir() {
            return Ok(json!({ "error": format!("Namespace '{name}' not found") }));
        }

        let mut details = Map::new();
        details.insert("name".into(), json!(name));
        details.insert("base_path".into(), json!(dir.display().to_string()));
        details.insert("files".into(), json!(yaml_files(&dir)?));
        details.insert("features".into(), json!(NamespaceFeatures::detect(&dir)));

        // Absent kustomization: key omitted, not `false`.
        if let Some(registered) = staging_registration(&ctx.layout.staging_kustomization(), &name)? {
            details.insert("registered".into(), json!(registered));
        }
        if let Some(image) = extract_image(&dir.join("deployment.yaml"))? {
            details.insert("image".into(), json!(image));
        }

        Ok(Value::Object(details))
    }
}
