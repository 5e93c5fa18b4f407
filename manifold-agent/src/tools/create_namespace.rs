//! `create_namespace`: runs the scaffolding script with flags built from the input.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AgentError;
use crate::process::ChildGuard;
use crate::tool::{Tool, ToolContext};

/// `app.kubernetes.io/component` values the scaffolding script accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Application,
    Frontend,
    Backend,
    Worker,
    Api,
    Database,
    Cache,
}

impl Component {
    pub fn all() -> &'static [Component] {
        &[
            Component::Application,
            Component::Frontend,
            Component::Backend,
            Component::Worker,
            Component::Api,
            Component::Database,
            Component::Cache,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Application => "application",
            Component::Frontend => "frontend",
            Component::Backend => "backend",
            Component::Worker => "worker",
            Component::Api => "api",
            Component::Database => "database",
            Component::Cache => "cache",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateNamespaceParams {
    pub app_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub replicas: Option<u32>,
    #[serde(default)]
    pub enable_ingress: bool,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub enable_secrets: bool,
    #[serde(default)]
    pub enable_storage: bool,
    #[serde(default)]
    pub storage_size: Option<String>,
    #[serde(default)]
    pub enable_redis: bool,
    #[serde(default)]
    pub component: Option<Component>,
    #[serde(default)]
    pub part_of: Option<String>,
    #[serde(default)]
    pub register: bool,
    #[serde(default)]
    pub dry_run: bool,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

fn flag_with_value(args: &mut Vec<String>, flag: &str, value: Option<String>) {
    if let Some(value) = value {
        args.push(flag.to_string());
        args.push(value);
    }
}

fn switch(args: &mut Vec<String>, flag: &str, on: bool) {
    if on {
        args.push(flag.to_string());
    }
}

impl CreateNamespaceParams {
    /// Script arguments, `app_name` first. Unset, zero and empty values add no flag.
    pub(crate) fn to_args(&self) -> Vec<String> {
        let mut args = vec![self.app_name.clone()];
        flag_with_value(&mut args, "--image", non_empty(&self.image));
        flag_with_value(
            &mut args,
            "--port",
            self.port.filter(|p| *p != 0).map(|p| p.to_string()),
        );
        flag_with_value(
            &mut args,
            "--replicas",
            self.replicas.filter(|r| *r != 0).map(|r| r.to_string()),
        );
        switch(&mut args, "--with-ingress", self.enable_ingress);
        flag_with_value(&mut args, "--host", non_empty(&self.hostname));
        switch(&mut args, "--with-secrets", self.enable_secrets);
        switch(&mut args, "--with-storage", self.enable_storage);
        flag_with_value(&mut args, "--storage-size", non_empty(&self.storage_size));
        switch(&mut args, "--with-redis", self.enable_redis);
        flag_with_value(
            &mut args,
            "--component",
            self.component.map(|c| c.as_str().to_string()),
        );
        flag_with_value(&mut args, "--part-of", non_empty(&self.part_of));
        switch(&mut args, "--register", self.register);
        switch(&mut args, "--dry-run", self.dry_run);
        args
    }
}

/// Runs `automation/create-namespace.sh` from the repository root.
pub struct CreateNamespace;

impl Tool for CreateNamespace {
    fn name(&self) -> &'static str {
        "create_namespace"
    }

    fn description(&self) -> &'static str {
        "Create a new Kubernetes namespace with all required scaffolding: namespace, \
         deployment, service and kustomization, plus optional ingress, secrets, \
         storage and Redis."
    }

    fn input_schema(&self) -> Value {
        let components: Vec<&str> = Component::all().iter().map(Component::as_str).collect();
        json!({
            "type": "object",
            "properties": {
                "app_name": {"type": "string", "description": "Unique name for the application (lowercase, alphanumeric, dashes)"},
                "image": {"type": "string", "description": "Container image (default: ghcr.io/lzetam/<app-name>:latest)"},
                "port": {"type": "integer", "description": "Container port", "default": 8080},
                "replicas": {"type": "integer", "description": "Number of pod replicas", "default": 1},
                "enable_ingress": {"type": "boolean", "description": "Expose via ingress controller", "default": false},
                "hostname": {"type": "string", "description": "Ingress hostname"},
                "enable_secrets": {"type": "boolean", "description": "Enable AWS Secrets Manager integration", "default": false},
                "enable_storage": {"type": "boolean", "description": "Add PersistentVolumeClaim", "default": false},
                "storage_size": {"type": "string", "description": "PVC size", "default": "10Gi"},
                "enable_redis": {"type": "boolean", "description": "Deploy Redis for caching", "default": false},
                "component": {"type": "string", "description": "Component type label", "enum": components},
                "part_of": {"type": "string", "description": "Parent application/platform name"},
                "register": {"type": "boolean", "description": "Auto-register in staging kustomization", "default": false},
                "dry_run": {"type": "boolean", "description": "Preview without creating files", "default": false}
            },
            "required": ["app_name"]
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: CreateNamespaceParams = serde_json::from_value(input)?;
        let script = ctx.layout.create_script();
        let args = params.to_args();
        let command = std::iter::once(script.display().to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!("running {command}");
        let output = ChildGuard::spawn(&script, &args, &ctx.layout.repo_root)?.finish()?;
        let success = output.success();
        let error = if success {
            None
        } else {
            tracing::warn!("{} exited with {:?}", script.display(), output.exit_code);
            Some(output.stderr)
        };

        Ok(json!({
            "success": success,
            "exit_code": output.exit_code,
            "output": output.stdout,
            "error": error,
            "command": command,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_params_pass_only_app_name() {
        let params = CreateNamespaceParams {
            app_name: "svc-1".to_string(),
            ..Default::default()
        };
        assert_eq!(params.to_args(), vec!["svc-1"]);
    }

    #[test]
    fn flags_follow_script_order() {
        let params: CreateNamespaceParams = serde_json::from_value(json!({
            "app_name": "shop",
            "image": "ghcr.io/acme/shop:1.2",
            "port": 9000,
            "enable_ingress": true,
            "hostname": "shop.example.com",
            "enable_storage": true,
            "storage_size": "20Gi",
            "component": "frontend",
            "register": true
        }))
        .unwrap();
        assert_eq!(
            params.to_args().join(" "),
            "shop --image ghcr.io/acme/shop:1.2 --port 9000 --with-ingress \
             --host shop.example.com --with-storage --storage-size 20Gi \
             --component frontend --register"
        );
    }

    #[test]
    fn zero_and_empty_values_add_no_flag() {
        let params: CreateNamespaceParams = serde_json::from_value(json!({
            "app_name": "x",
            "port": 0,
            "image": "",
            "part_of": ""
        }))
        .unwrap();
        assert_eq!(params.to_args(), vec!["x"]);
    }

    #[test]
    fn unknown_component_is_rejected() {
        let parsed = serde_json::from_value::<CreateNamespaceParams>(json!({
            "app_name": "x",
            "component": "mainframe"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_app_name_is_rejected() {
        let parsed = serde_json::from_value::<CreateNamespaceParams>(json!({"port": 80}));
        assert!(parsed.is_err());
    }
}
