//! `list_namespaces`: namespaces under `apps/base` with detected features.

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use manifold_detector::scan_namespaces;

use crate::error::AgentError;
use crate::tool::{Tool, ToolContext};

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    filter: Option<String>,
    #[serde(default)]
    show_registered: bool,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    pub name: String,
    pub has_base: bool,
    pub has_ingress: bool,
    pub has_secrets: bool,
    pub has_storage: bool,
    pub has_redis: bool,
    pub registered: bool,
}

fn matcher(filter: Option<&str>) -> Result<Option<GlobMatcher>, AgentError> {
    match filter.filter(|f| !f.is_empty()) {
        Some(pattern) => Ok(Some(Glob::new(pattern)?.compile_matcher())),
        None => Ok(None),
    }
}

/// Every namespace under `apps/base` matching the optional glob.
pub fn list(
    ctx: &ToolContext<'_>,
    filter: Option<&str>,
    registered_only: bool,
) -> Result<Vec<NamespaceSummary>, AgentError> {
    let matcher = matcher(filter)?;
    let found = scan_namespaces(&ctx.layout.apps_base, &ctx.layout.apps_staging)?;
    Ok(found
        .into_iter()
        .filter(|ns| matcher.as_ref().map_or(true, |m| m.is_match(&ns.name)))
        .filter(|ns| !registered_only || ns.registered)
        .map(|ns| NamespaceSummary {
            has_base: true,
            has_ingress: ns.features.ingress,
            has_secrets: ns.features.secrets,
            has_storage: ns.features.storage,
            has_redis: ns.features.redis,
            registered: ns.registered,
            name: ns.name,
        })
        .collect())
}

pub struct ListNamespaces;

impl Tool for ListNamespaces {
    fn name(&self) -> &'static str {
        "list_namespaces"
    }

    fn description(&self) -> &'static str {
        "List all application namespaces in the repository."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filter": {"type": "string", "description": "Filter by name pattern (glob, e.g. agent-*)"},
                "show_registered": {"type": "boolean", "description": "Only show namespaces registered in staging", "default": false}
            }
        })
    }

    fn execute(&self, ctx: &ToolContext<'_>, input: Value) -> Result<Value, AgentError> {
        let params: ListParams = serde_json::from_value(input)?;
        let namespaces = list(ctx, params.filter.as_deref(), params.show_registered)?;
        Ok(json!({
            "count": namespaces.len(),
            "namespaces": namespaces,
        }))
    }
}
