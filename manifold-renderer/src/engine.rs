//! Tera rendering engine; [`ManifestKind`] and [`Renderer`].
//!
//! # Output layout
//!
//! | Kind       | Output path                              |
//! |------------|------------------------------------------|
//! | Deployment | `<output_dir>/deployments/<slug>.yaml`   |
//! | Service    | `<output_dir>/services/<slug>.yaml`      |
//!
//! Rendering never touches the filesystem; persistence lives in `manifold-sync`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use manifold_core::AgentSpec;

use crate::context::{
    ManifestContext, NamespaceModuleCtx, SecretMappingContext, TerraformBatchContext,
};
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates; baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

pub const DEPLOYMENT_TEMPLATE: &str = "deployment.yaml.tera";
pub const SERVICE_TEMPLATE: &str = "service.yaml.tera";
pub const TERRAFORM_TEMPLATE: &str = "namespace_modules.tf.tera";
pub const SECRET_MAPPING_TEMPLATE: &str = "secret_mapping.yaml.tera";

const TPLS: &[(&str, &str)] = &[
    (DEPLOYMENT_TEMPLATE, include_str!("templates/deployment.yaml.tera")),
    (SERVICE_TEMPLATE, include_str!("templates/service.yaml.tera")),
    (TERRAFORM_TEMPLATE, include_str!("templates/namespace_modules.tf.tera")),
    (SECRET_MAPPING_TEMPLATE, include_str!("templates/secret_mapping.yaml.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// Overrides are flat: `<dir>/deployment.yaml.tera` replaces the embedded one.
fn load_overrides(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("tera"))
        .collect();
    paths.sort();

    let mut overrides = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !TPLS.iter().any(|(known, _)| *known == name) {
            let known: Vec<&str> = TPLS.iter().map(|(n, _)| *n).collect();
            return Err(RenderError::UnknownOverride { path, known: known.join(", ") });
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        overrides.push((name, contents.replace("\r\n", "\n")));
    }
    Ok(overrides)
}

fn build_tera(override_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = TPLS
        .iter()
        .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
        .collect();
    if let Some(dir) = override_dir {
        for (name, content) in load_overrides(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates.into_iter().collect::<Vec<_>>())?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// ManifestKind
// ---------------------------------------------------------------------------

/// The two manifests generated per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    Deployment,
    Service,
}

impl ManifestKind {
    /// Both kinds in write order.
    pub fn all() -> &'static [ManifestKind] {
        &[ManifestKind::Deployment, ManifestKind::Service]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            ManifestKind::Deployment => DEPLOYMENT_TEMPLATE,
            ManifestKind::Service => SERVICE_TEMPLATE,
        }
    }

    /// Sibling directory under the output root.
    pub fn directory(&self) -> &'static str {
        match self {
            ManifestKind::Deployment => "deployments",
            ManifestKind::Service => "services",
        }
    }

    /// `<output_dir>/<directory>/<slug>.yaml`
    pub fn output_path(&self, output_dir: &Path, slug: &str) -> PathBuf {
        output_dir.join(self.directory()).join(format!("{slug}.yaml"))
    }
}

/// Rendered Deployment and Service text for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPair {
    pub deployment: String,
    pub service: String,
}

impl ManifestPair {
    pub fn get(&self, kind: ManifestKind) -> &str {
        match kind {
            ManifestKind::Deployment => &self.deployment,
            ManifestKind::Service => &self.service,
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Tera-based renderer for manifests and namespace snippets.
///
/// Create once with [`Renderer::new`] (or [`Renderer::with_overrides`]) and reuse.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with embedded templates.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_overrides(None)
    }

    /// Embedded templates plus any same-named `.tera` files in `override_dir`.
    pub fn with_overrides(override_dir: Option<&Path>) -> Result<Self, RenderError> {
        Ok(Renderer { tera: build_tera(override_dir)? })
    }

    /// Render one manifest kind for `spec`.
    pub fn render(&self, spec: &AgentSpec, kind: ManifestKind) -> Result<String, RenderError> {
        let ctx = ManifestContext::from_spec(spec).to_tera_context()?;
        Ok(self.tera.render(kind.template_name(), &ctx)?)
    }

    /// Render the Deployment/Service pair for `spec`. Pure: no I/O.
    pub fn render_pair(&self, spec: &AgentSpec) -> Result<ManifestPair, RenderError> {
        Ok(ManifestPair {
            deployment: self.render(spec, ManifestKind::Deployment)?,
            service: self.render(spec, ManifestKind::Service)?,
        })
    }

    /// One Terraform `module` stanza per namespace, separated by blank lines.
    pub fn render_namespace_modules(
        &self,
        part_of: &str,
        modules: &[NamespaceModuleCtx],
    ) -> Result<String, RenderError> {
        let ctx = TerraformBatchContext {
            part_of: part_of.to_string(),
            modules: modules.to_vec(),
        };
        let ctx = tera::Context::from_serialize(&ctx)?;
        let rendered = self.tera.render(TERRAFORM_TEMPLATE, &ctx)?;
        Ok(rendered.trim_start_matches('\n').to_string())
    }

    /// The `spec.data` entry to paste into an ExternalSecret, without trailing newline.
    pub fn render_secret_mapping(
        &self,
        mapping: &SecretMappingContext,
    ) -> Result<String, RenderError> {
        let ctx = tera::Context::from_serialize(mapping)?;
        let rendered = self.tera.render(SECRET_MAPPING_TEMPLATE, &ctx)?;
        Ok(rendered.trim_end().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use manifold_core::{AgentSlug, RegistryEntry};
    use tempfile::TempDir;

    fn make_spec(slug: &str) -> AgentSpec {
        AgentSpec::from_entry(
            AgentSlug::from(slug),
            RegistryEntry {
                description: "Root cause analysis".to_string(),
                team: None,
                max_iterations: 20,
                tier: None,
            },
        )
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn output_paths_are_sibling_directories() {
        let out = PathBuf::from("/out");
        assert_eq!(
            ManifestKind::Deployment.output_path(&out, "debugger"),
            PathBuf::from("/out/deployments/debugger.yaml")
        );
        assert_eq!(
            ManifestKind::Service.output_path(&out, "debugger"),
            PathBuf::from("/out/services/debugger.yaml")
        );
    }

    #[test]
    fn pair_contains_agent_name() {
        let renderer = Renderer::new().unwrap();
        let pair = renderer.render_pair(&make_spec("debugger")).unwrap();
        assert!(pair.deployment.contains("name: agent-debugger"));
        assert!(pair.service.contains("app: agent-debugger"));
        assert!(pair.deployment.contains("cpu: 250m"), "debugger is complex tier");
    }

    #[test]
    fn optional_secret_refs_are_marked() {
        let renderer = Renderer::new().unwrap();
        let pair = renderer.render_pair(&make_spec("verifier")).unwrap();
        assert_eq!(pair.deployment.matches("optional: true").count(), 2);
    }

    #[test]
    fn secret_mapping_without_property() {
        let renderer = Renderer::new().unwrap();
        let snippet = renderer
            .render_secret_mapping(&SecretMappingContext {
                secret_key: "API_TOKEN".to_string(),
                remote_key: "prod/user-api".to_string(),
                property: None,
            })
            .unwrap();
        assert_eq!(
            snippet,
            "    - secretKey: API_TOKEN\n      remoteRef:\n        key: prod/user-api"
        );
    }

    #[test]
    fn secret_mapping_with_property() {
        let renderer = Renderer::new().unwrap();
        let snippet = renderer
            .render_secret_mapping(&SecretMappingContext {
                secret_key: "DB_PASSWORD".to_string(),
                remote_key: "prod/db".to_string(),
                property: Some("password".to_string()),
            })
            .unwrap();
        assert!(snippet.ends_with("        key: prod/db\n        property: password"));
    }

    #[test]
    fn terraform_modules_one_stanza_each() {
        let renderer = Renderer::new().unwrap();
        let modules = vec![
            NamespaceModuleCtx::new("user-api", 8080, true, true, "api"),
            NamespaceModuleCtx::new("worker", 9000, false, false, "worker"),
        ];
        let tf = renderer.render_namespace_modules("shop", &modules).unwrap();
        assert!(tf.starts_with("module \"user_api\" {"));
        assert!(tf.contains("module \"worker\" {"));
        assert!(tf.contains("  enable_ingress = true"));
        assert!(tf.contains("  port           = 9000"));
        assert_eq!(tf.matches("part_of        = \"shop\"").count(), 2);
    }

    #[test]
    fn override_replaces_embedded_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("service.yaml.tera"),
            "kind: Service\nname: {{ object_name }}\n",
        )
        .unwrap();
        let renderer = Renderer::with_overrides(Some(dir.path())).unwrap();
        let service = renderer.render(&make_spec("debugger"), ManifestKind::Service).unwrap();
        assert_eq!(service, "kind: Service\nname: agent-debugger\n");
    }

    #[test]
    fn unknown_override_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("ingress.yaml.tera"), "x").unwrap();
        let err = Renderer::with_overrides(Some(dir.path())).err().expect("must fail");
        assert!(matches!(err, RenderError::UnknownOverride { .. }));
    }
}
