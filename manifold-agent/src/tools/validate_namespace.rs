//! `validate_namespace`: name checks before anything is created.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AgentError;
use crate::tool::{Tool, ToolContext};

/// Kubernetes caps namespace names at one DNS label.
pub const MAX_NAME_LEN: usize = 63;

/// Names owned by the cluster or its GitOps controller.
pub const RESERVED_NAMESPACES: &[&str] = &[
    "default",
    "kube-system",
    "kube-public",
    "kube-node-lease",
    "flux-system",
];

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]*[a-z0-9]$|^[a-z]$").expect("valid namespace name regex")
});

#[derive(Debug, Deserialize)]
struct ValidateParams {
    app_name: String,
}

/// Outcome of the independent name checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub app_name: String,
    pub issues: Vec<String>,
}

/// Run every check; a name can collect several issues at once.
pub fn validate(ctx: &ToolContext<'_>, name: &str) -> Validation {
    let mut issues = Vec::new();

    if !NAME_REGEX.is_match(name) {
        issues.push("Name must be lowercase alphanumeric with dashes, starting with a letter".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        issues.push(format!(
            "Name exceeds {MAX_NAME_LEN} character limit for Kubernetes namespaces"
        ));
    }
    if ctx
        .layout
        .namespace_dir(name)
        .is_some_and(|dir| dir.exists())
    {
        issues.push(format!("Namespace '{name}' already exists in apps/base/"));
    }
    if RESERVED_NAMESPACES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(name))
    {
        issues.push(format!("'{name}' is a reserved Kubernetes namespace"));
    }

    Validation {
        valid: issues.is_empty(),
        app_name: name.to_string(),
        issues,
    }
}

pub struct ValidateNamespace;

impl Tool for ValidateNamespace {
    fn name(&self) -> &'static str {
        "validate_namespace"
    }

    fn description(&self) -> &'static str {
        "Validate a namespace name and check for conflicts before creation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "app_name": {"type": "string", "description": "Proposed namespace name to validate"}
            },
            "required": ["app_name"]
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: ValidateParams = serde_json::from_value(input)?;
        Ok(serde_json::to_value(validate(ctx, &params.app_name))?)
    }
}
