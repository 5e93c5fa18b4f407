//! Template contexts; serializable rendering payloads.
//!
//! [`ManifestContext`] is built from an [`AgentSpec`] and the fixed
//! [`ClusterProfile`]; nothing else feeds the Deployment/Service templates.

use serde::{Deserialize, Serialize};

use manifold_core::{AgentSpec, ResourceTier};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Cluster profile
// ---------------------------------------------------------------------------

/// Fixed service-discovery environment variable.
#[derive(Debug, Clone, Serialize)]
pub struct EnvVar {
    pub name: &'static str,
    pub value: &'static str,
}

/// Secret mounted into the container environment via `envFrom`.
#[derive(Debug, Clone, Serialize)]
pub struct SecretRef {
    pub name: &'static str,
    pub optional: bool,
}

/// Cluster-wide constants shared by every agent manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterProfile {
    pub namespace: &'static str,
    pub part_of: &'static str,
    pub image_prefix: &'static str,
    pub image_tag: &'static str,
    pub image_pull_secret: &'static str,
    pub memory_claim: &'static str,
    pub port: u16,
    pub env: &'static [EnvVar],
    pub env_from: &'static [SecretRef],
}

/// The one canonical cluster profile.
pub const CLUSTER: ClusterProfile = ClusterProfile {
    namespace: "zi",
    part_of: "zi-agents",
    image_prefix: "lzetam/zi-agent-",
    image_tag: "latest",
    image_pull_secret: "dockerhub-registry",
    memory_claim: "zi-agents-memory",
    port: 8000,
    env: &[
        EnvVar { name: "ZI_BRAIN_URL", value: "http://zi-brain.zi.svc.cluster.local:8100" },
        EnvVar { name: "ZI_OLLAMA_URL", value: "http://ollama-gpu.ollama.svc.cluster.local:11434" },
        EnvVar { name: "ZI_KNOWLEDGE_REDIS_HOST", value: "redis.zi.svc.cluster.local" },
        EnvVar { name: "ZI_KNOWLEDGE_REDIS_PORT", value: "6379" },
        EnvVar { name: "ZI_API_URL", value: "http://zi.zi.svc.cluster.local:8080" },
    ],
    env_from: &[
        SecretRef { name: "zi-agents-ai-keys", optional: false },
        SecretRef { name: "zi-brain-api-key", optional: true },
        SecretRef { name: "zi-agents-discord", optional: true },
    ],
};

// ---------------------------------------------------------------------------
// Manifest context
// ---------------------------------------------------------------------------

/// Agent fields as the templates see them.
#[derive(Debug, Clone, Serialize)]
pub struct AgentCtx {
    /// Hyphenated slug.
    pub name: String,
    pub description: String,
    pub max_iterations: u32,
    pub tier: String,
}

/// Rendering payload for the Deployment and Service templates.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestContext {
    pub object_name: String,
    pub image: String,
    pub agent: AgentCtx,
    pub resources: ResourceTier,
    pub cluster: ClusterProfile,
}

impl ManifestContext {
    /// Build a [`ManifestContext`] from an [`AgentSpec`] and its tier's resources.
    pub fn from_spec(spec: &AgentSpec) -> Self {
        let name = spec.slug.hyphenated();
        ManifestContext {
            object_name: format!("agent-{name}"),
            image: format!("{}{}:{}", CLUSTER.image_prefix, name, CLUSTER.image_tag),
            agent: AgentCtx {
                name,
                description: spec.description.clone(),
                max_iterations: spec.max_iterations,
                tier: spec.tier.to_string(),
            },
            resources: spec.resources().clone(),
            cluster: CLUSTER,
        }
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

// ---------------------------------------------------------------------------
// Terraform batch context
// ---------------------------------------------------------------------------

/// One `module "<name>"` stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceModuleCtx {
    /// `app_name` with `-` replaced by `_`.
    pub module_name: String,
    pub app_name: String,
    pub port: u16,
    pub enable_ingress: bool,
    pub enable_secrets: bool,
    pub component: String,
}

impl NamespaceModuleCtx {
    pub fn new(
        app_name: &str,
        port: u16,
        enable_ingress: bool,
        enable_secrets: bool,
        component: &str,
    ) -> Self {
        NamespaceModuleCtx {
            module_name: app_name.replace('-', "_"),
            app_name: app_name.to_string(),
            port,
            enable_ingress,
            enable_secrets,
            component: component.to_string(),
        }
    }
}

/// Rendering payload for a batch of namespace modules.
#[derive(Debug, Clone, Serialize)]
pub struct TerraformBatchContext {
    pub part_of: String,
    pub modules: Vec<NamespaceModuleCtx>,
}

// ---------------------------------------------------------------------------
// Secret mapping context
// ---------------------------------------------------------------------------

/// Rendering payload for one `spec.data` entry of an ExternalSecret.
#[derive(Debug, Clone, Serialize)]
pub struct SecretMappingContext {
    pub secret_key: String,
    pub remote_key: String,
    pub property: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_core::{AgentSlug, RegistryEntry};

    fn spec(slug: &str, team: Option<&str>) -> AgentSpec {
        AgentSpec::from_entry(
            AgentSlug::from(slug),
            RegistryEntry {
                description: "Does things".to_string(),
                team: team.map(str::to_string),
                max_iterations: 12,
                tier: None,
            },
        )
    }

    #[test]
    fn context_fields_populated() {
        let ctx = ManifestContext::from_spec(&spec("tech_writer", None));
        assert_eq!(ctx.object_name, "agent-tech-writer");
        assert_eq!(ctx.image, "lzetam/zi-agent-tech-writer:latest");
        assert_eq!(ctx.agent.max_iterations, 12);
        assert_eq!(ctx.agent.tier, "standard");
        assert_eq!(ctx.resources.requests_cpu, "100m");
    }

    #[test]
    fn executive_resources_selected() {
        let ctx = ManifestContext::from_spec(&spec("ceo-cto", Some("Executive")));
        assert_eq!(ctx.resources.limits_cpu, "750m");
    }

    #[test]
    fn module_name_uses_underscores() {
        let m = NamespaceModuleCtx::new("user-api-v2", 8080, true, false, "api");
        assert_eq!(m.module_name, "user_api_v2");
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = ManifestContext::from_spec(&spec("verifier", None));
        ctx.to_tera_context().expect("context conversion");
    }
}
