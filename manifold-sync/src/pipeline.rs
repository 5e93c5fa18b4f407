//! Registry → gate → render → write.
//!
//! One call to [`generate`] walks every agent in a [`LoadedRegistry`] in slug
//! order. Agents whose source directory or `Dockerfile` is missing are
//! skipped and reported; the rest get a Deployment and a Service written
//! through [`crate::writer::atomic_write`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use manifold_core::{AgentSlug, LoadedRegistry, RejectedEntry, Tier};
use manifold_detector::{check_source, yaml_files};
use manifold_renderer::{ManifestKind, Renderer};

use crate::error::SyncError;
use crate::writer::{atomic_write, WriteResult};

/// Inputs for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory holding one sub-directory per agent slug.
    pub source_root: PathBuf,
    /// Root under which `deployments/` and `services/` are written.
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

/// An agent whose manifests were rendered.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAgent {
    pub slug: AgentSlug,
    pub team: Option<String>,
    pub tier: Tier,
    pub writes: Vec<WriteResult>,
}

/// An agent that failed the source gate.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedAgent {
    pub slug: AgentSlug,
    pub reason: String,
}

/// Everything a generation run did.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub generated_at: DateTime<Utc>,
    pub registry: Option<PathBuf>,
    pub dry_run: bool,
    pub generated: Vec<GeneratedAgent>,
    pub skipped: Vec<SkippedAgent>,
    pub rejected: Vec<RejectedEntry>,
    /// Manifests on disk with no matching registry entry. Reported, never deleted.
    pub orphaned: Vec<PathBuf>,
}

impl GenerateReport {
    /// Every write outcome across all generated agents.
    pub fn writes(&self) -> impl Iterator<Item = &WriteResult> {
        self.generated.iter().flat_map(|a| a.writes.iter())
    }

    pub fn written_count(&self) -> usize {
        self.writes()
            .filter(|w| matches!(w, WriteResult::Written { .. }))
            .count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.writes().filter(|w| w.is_unchanged()).count()
    }
}

/// Generate manifests for every agent in `registry`.
///
/// Gate failures and rejected entries are reported, never fatal. Only I/O
/// and rendering failures abort the run.
pub fn generate(
    registry: &LoadedRegistry,
    renderer: &Renderer,
    opts: &GenerateOptions,
) -> Result<GenerateReport, SyncError> {
    let generated_at = Utc::now();

    for rejected in &registry.rejected {
        tracing::warn!("registry entry '{}' rejected: {}", rejected.key, rejected.reason);
    }

    let mut generated = Vec::new();
    let mut skipped = Vec::new();

    for spec in &registry.agents {
        let check = check_source(&opts.source_root, &spec.slug);
        if let Some(reason) = check.skip_reason() {
            tracing::warn!("skipping {}: {}", spec.slug, reason);
            skipped.push(SkippedAgent {
                slug: spec.slug.clone(),
                reason: reason.to_string(),
            });
            continue;
        }

        let pair = renderer.render_pair(spec)?;
        let name = spec.slug.hyphenated();
        let mut writes = Vec::with_capacity(ManifestKind::all().len());
        for kind in ManifestKind::all() {
            let path = kind.output_path(&opts.output_dir, &name);
            writes.push(atomic_write(&path, pair.get(*kind), opts.dry_run)?);
        }

        generated.push(GeneratedAgent {
            slug: spec.slug.clone(),
            team: spec.team.clone(),
            tier: spec.tier,
            writes,
        });
    }

    let orphaned = find_orphans(registry, &opts.output_dir)?;
    for path in &orphaned {
        tracing::warn!("orphaned manifest: {}", path.display());
    }

    Ok(GenerateReport {
        generated_at,
        registry: registry.source.clone(),
        dry_run: opts.dry_run,
        generated,
        skipped,
        rejected: registry.rejected.clone(),
        orphaned,
    })
}

/// Manifests under the output directories whose stem is not a registry agent.
pub(crate) fn find_orphans(
    registry: &LoadedRegistry,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, SyncError> {
    let known: Vec<String> = registry.agents.iter().map(|a| a.slug.hyphenated()).collect();
    let mut orphans = Vec::new();
    for kind in ManifestKind::all() {
        let dir = output_dir.join(kind.directory());
        if !dir.is_dir() {
            continue;
        }
        for file in yaml_files(&dir)? {
            let stem = file.trim_end_matches(".yaml");
            if !known.iter().any(|k| k == stem) {
                orphans.push(dir.join(&file));
            }
        }
    }
    Ok(orphans)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use manifold_core::registry;
    use tempfile::TempDir;

    use super::*;

    fn ready(source_root: &Path, slug: &str) {
        let dir = source_root.join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Dockerfile"), "FROM scratch\n").unwrap();
    }

    #[test]
    fn empty_registry_produces_empty_report() {
        let out = TempDir::new().unwrap();
        let opts = GenerateOptions {
            source_root: out.path().join("src"),
            output_dir: out.path().to_path_buf(),
            dry_run: false,
        };
        let report = generate(&LoadedRegistry::default(), &Renderer::new().unwrap(), &opts).unwrap();
        assert!(report.generated.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.orphaned.is_empty());
    }

    #[test]
    fn foreign_manifest_is_reported_as_orphan() {
        let out = TempDir::new().unwrap();
        let deployments = out.path().join("deployments");
        fs::create_dir_all(&deployments).unwrap();
        fs::write(deployments.join("retired-agent.yaml"), "kind: Deployment\n").unwrap();
        fs::write(deployments.join("code-reviewer.yaml"), "kind: Deployment\n").unwrap();

        let orphans = find_orphans(&registry::builtin(), out.path()).unwrap();
        assert_eq!(orphans, vec![deployments.join("retired-agent.yaml")]);
    }

    #[test]
    fn underscore_slug_writes_hyphenated_file_names() {
        let out = TempDir::new().unwrap();
        let reg_path = out.path().join("registry.yaml");
        fs::write(&reg_path, "agents:\n  data_analyst:\n    description: Numbers\n").unwrap();
        ready(out.path(), "data_analyst");

        let opts = GenerateOptions {
            source_root: out.path().to_path_buf(),
            output_dir: out.path().join("k8s"),
            dry_run: false,
        };
        let reg = registry::load_at(&reg_path).unwrap();
        let report = generate(&reg, &Renderer::new().unwrap(), &opts).unwrap();

        assert_eq!(report.generated.len(), 1);
        assert!(out.path().join("k8s/deployments/data-analyst.yaml").is_file());
        assert!(out.path().join("k8s/services/data-analyst.yaml").is_file());
    }
}
