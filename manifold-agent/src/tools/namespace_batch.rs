//! `create_namespace_batch`: Terraform module blocks for several namespaces.

use serde::Deserialize;
use serde_json::{json, Value};

use manifold_renderer::NamespaceModuleCtx;

use crate::error::AgentError;
use crate::tool::{Tool, ToolContext};

/// Steps handed back with a plan; nothing here runs Terraform.
pub const PLAN_INSTRUCTIONS: [&str; 5] = [
    "1. Add the above to terraform/main.tf",
    "2. Run: cd terraform && terraform init",
    "3. Run: terraform plan",
    "4. Run: terraform apply",
    "5. Register namespaces in apps/staging/kustomization.yaml",
];

fn default_port() -> u16 {
    8080
}

fn default_component() -> String {
    "application".to_string()
}

fn default_part_of() -> String {
    "platform".to_string()
}

fn default_plan_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct BatchEntry {
    app_name: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    enable_ingress: bool,
    #[serde(default)]
    enable_secrets: bool,
    #[serde(default = "default_component")]
    component: String,
}

#[derive(Debug, Deserialize)]
struct BatchParams {
    namespaces: Vec<BatchEntry>,
    #[serde(default = "default_part_of")]
    part_of: String,
    #[serde(default = "default_plan_only")]
    plan_only: bool,
}

/// Renders Terraform `module` stanzas for several namespaces.
pub struct CreateNamespaceBatch;

impl Tool for CreateNamespaceBatch {
    fn name(&self) -> &'static str {
        "create_namespace_batch"
    }

    fn description(&self) -> &'static str {
        "Create multiple namespaces at once using Terraform. Generates one module \
         block per namespace; review it and apply it yourself."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "namespaces": {
                    "type": "array",
                    "description": "List of namespace configurations",
                    "items": {
                        "type": "object",
                        "properties": {
                            "app_name": {"type": "string"},
                            "port": {"type": "integer", "default": 8080},
                            "enable_ingress": {"type": "boolean", "default": false},
                            "enable_secrets": {"type": "boolean", "default": false},
                            "component": {"type": "string", "default": "application"}
                        },
                        "required": ["app_name"]
                    }
                },
                "part_of": {"type": "string", "description": "Common platform name for all namespaces", "default": "platform"},
                "plan_only": {"type": "boolean", "description": "Only show terraform plan", "default": true}
            },
            "required": ["namespaces"]
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: BatchParams = serde_json::from_value(input)?;
        let modules: Vec<NamespaceModuleCtx> = params
            .namespaces
            .iter()
            .map(|ns| {
                NamespaceModuleCtx::new(
                    &ns.app_name,
                    ns.port,
                    ns.enable_ingress,
                    ns.enable_secrets,
                    &ns.component,
                )
            })
            .collect();
        let config = ctx
            .renderer
            .render_namespace_modules(&params.part_of, &modules)?;

        if params.plan_only {
            return Ok(json!({
                "action": "plan",
                "namespace_count": modules.len(),
                "terraform_config": config,
                "instructions": PLAN_INSTRUCTIONS,
            }));
        }
        Ok(json!({
            "action": "generated",
            "namespace_count": modules.len(),
            "terraform_config": config,
        }))
    }
}
