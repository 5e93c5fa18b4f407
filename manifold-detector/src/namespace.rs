//! Namespace marker-file detection in a GitOps `apps/` tree.
//!
//! ```text
//! apps/
//!   base/<ns>/namespace.yaml     (required; marks <ns> as a namespace)
//!   base/<ns>/ingress.yaml       (feature flags, all optional)
//!   base/<ns>/secretstore.yaml
//!   base/<ns>/storage.yaml
//!   base/<ns>/redis.yaml
//!   staging/<ns>/                (registration by directory)
//!   staging/kustomization.yaml   (registration by `- <ns>` line)
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{io_err, DetectError};

/// Presence of this file makes a directory a namespace.
pub const NAMESPACE_MARKER: &str = "namespace.yaml";

static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"image:\s*(\S+)").expect("valid image regex"));

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Optional namespace features, each signalled by one marker file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Ingress,
    Secrets,
    Storage,
    Redis,
}

impl Feature {
    pub fn all() -> &'static [Feature] {
        &[Feature::Ingress, Feature::Secrets, Feature::Storage, Feature::Redis]
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Feature::Ingress => "ingress.yaml",
            Feature::Secrets => "secretstore.yaml",
            Feature::Storage => "storage.yaml",
            Feature::Redis => "redis.yaml",
        }
    }
}

/// The four feature flags of a namespace directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NamespaceFeatures {
    pub ingress: bool,
    pub secrets: bool,
    pub storage: bool,
    pub redis: bool,
}

impl NamespaceFeatures {
    /// Read the marker files in `dir`.
    pub fn detect(dir: &Path) -> Self {
        let has = |f: Feature| dir.join(f.marker()).is_file();
        NamespaceFeatures {
            ingress: has(Feature::Ingress),
            secrets: has(Feature::Secrets),
            storage: has(Feature::Storage),
            redis: has(Feature::Redis),
        }
    }

    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Ingress => self.ingress,
            Feature::Secrets => self.secrets,
            Feature::Storage => self.storage,
            Feature::Redis => self.redis,
        }
    }
}

/// A namespace found under `apps/base`, recomputed on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDescriptor {
    pub name: String,
    pub features: NamespaceFeatures,
    /// `apps/staging/<name>/` exists.
    pub registered: bool,
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Scan `apps_base` one level deep, sorted by name.
///
/// Subdirectories without [`NAMESPACE_MARKER`] are ignored. A missing
/// `apps_base` yields an empty list.
pub fn scan_namespaces(
    apps_base: &Path,
    apps_staging: &Path,
) -> Result<Vec<NamespaceDescriptor>, DetectError> {
    let entries = match fs::read_dir(apps_base) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(io_err(apps_base, e)),
    };

    let mut dirs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .collect();
    dirs.sort_by_key(|e| e.file_name());

    Ok(dirs
        .into_iter()
        .filter(|e| e.path().join(NAMESPACE_MARKER).is_file())
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            NamespaceDescriptor {
                features: NamespaceFeatures::detect(&e.path()),
                registered: apps_staging.join(&name).is_dir(),
                name,
            }
        })
        .collect())
}

/// Names of the `*.yaml` files directly inside `dir`, sorted.
pub fn yaml_files(dir: &Path) -> Result<Vec<String>, DetectError> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".yaml"))
        .collect();
    names.sort();
    Ok(names)
}

/// Whether the staging kustomization lists `name`.
///
/// `None` when the kustomization file does not exist. A namespace counts as
/// listed when a line reads `- <name>`, optionally with a `./` prefix or a
/// trailing `/`.
pub fn staging_registration(
    kustomization: &Path,
    name: &str,
) -> Result<Option<bool>, DetectError> {
    let content = match fs::read_to_string(kustomization) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(kustomization, e)),
    };
    let listed = content.lines().any(|line| {
        let Some(entry) = line.trim().strip_prefix("- ") else {
            return false;
        };
        let entry = entry.trim();
        let entry = entry.strip_prefix("./").unwrap_or(entry);
        entry.strip_suffix('/').unwrap_or(entry) == name
    });
    Ok(Some(listed))
}

/// First `image:` reference in a deployment file, if the file exists.
pub fn extract_image(deployment: &Path) -> Result<Option<String>, DetectError> {
    let content = match fs::read_to_string(deployment) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(deployment, e)),
    };
    Ok(IMAGE_REGEX
        .captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_base_is_empty() {
        let root = TempDir::new().unwrap();
        let found = scan_namespaces(&root.path().join("base"), &root.path().join("staging"));
        assert!(found.unwrap().is_empty());
    }

    #[test]
    fn registration_line_variants() {
        let root = TempDir::new().unwrap();
        let k = root.path().join("kustomization.yaml");
        fs::write(&k, "resources:\n  - ./user-api/\n  - billing\n").unwrap();
        assert_eq!(staging_registration(&k, "user-api").unwrap(), Some(true));
        assert_eq!(staging_registration(&k, "billing").unwrap(), Some(true));
        assert_eq!(staging_registration(&k, "user").unwrap(), Some(false));
        assert_eq!(
            staging_registration(&root.path().join("absent.yaml"), "billing").unwrap(),
            None
        );
    }

    #[test]
    fn image_is_first_match() {
        let root = TempDir::new().unwrap();
        let d = root.path().join("deployment.yaml");
        fs::write(
            &d,
            "spec:\n  containers:\n    - name: app\n      image: ghcr.io/acme/app:1.2\n    - image: sidecar:latest\n",
        )
        .unwrap();
        assert_eq!(extract_image(&d).unwrap().as_deref(), Some("ghcr.io/acme/app:1.2"));
    }
}
