//! Agent registry loading.
//!
//! # File format
//!
//! ```yaml
//! agents:
//!   code-reviewer:
//!     description: Reviews code for quality
//!     team: Engineering
//!     max_iterations: 15
//!   ceo-cto:
//!     description: Strategic decisions
//!     team: Executive
//! ```
//!
//! A missing or unparseable file is fatal. Individual entries that do not
//! fit the schema are collected as [`RejectedEntry`] and left for the
//! caller to report; the rest of the registry still loads.
//!
//! # API pattern
//!
//! - `load_at(path)`: explicit path; used in tests with `TempDir`
//! - `load()`: uses [`default_registry_path`], delegates to `load_at`

use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use crate::error::RegistryError;
use crate::tier::Tier;
use crate::types::{AgentSlug, AgentSpec, RegistryEntry};

/// Registry location relative to the home directory.
pub const DEFAULT_REGISTRY_RELATIVE: &str = "dev/zi/agents/registry.yaml";

/// A registry entry that could not be turned into an [`AgentSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    pub key: String,
    pub reason: String,
}

/// Result of loading a registry: valid agents sorted by slug plus rejects.
#[derive(Debug, Clone, Default)]
pub struct LoadedRegistry {
    /// File the registry came from; `None` for the builtin table.
    pub source: Option<PathBuf>,
    pub agents: Vec<AgentSpec>,
    pub rejected: Vec<RejectedEntry>,
}

impl LoadedRegistry {
    pub fn get(&self, slug: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.slug.0 == slug)
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/dev/zi/agents/registry.yaml`; pure, no I/O.
pub fn default_registry_path_at(home: &Path) -> PathBuf {
    home.join(DEFAULT_REGISTRY_RELATIVE)
}

/// [`default_registry_path_at`] using `dirs::home_dir()`.
pub fn default_registry_path() -> Result<PathBuf, RegistryError> {
    Ok(default_registry_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the registry at `path`.
///
/// Returns `RegistryError::RegistryNotFound` if absent,
/// `RegistryError::Parse` (with path + line context) if the document is not YAML,
/// `RegistryError::MissingAgents` if there is no `agents` mapping.
pub fn load_at(path: &Path) -> Result<LoadedRegistry, RegistryError> {
    if !path.exists() {
        return Err(RegistryError::RegistryNotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut loaded = parse(&contents).map_err(|e| match e {
        ParseFailure::Yaml(source) => RegistryError::Parse { path: path.to_path_buf(), source },
        ParseFailure::MissingAgents => RegistryError::MissingAgents { path: path.to_path_buf() },
    })?;
    loaded.source = Some(path.to_path_buf());
    Ok(loaded)
}

/// `load_at` convenience wrapper for the default registry location.
pub fn load() -> Result<LoadedRegistry, RegistryError> {
    load_at(&default_registry_path()?)
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    MissingAgents,
}

fn parse(contents: &str) -> Result<LoadedRegistry, ParseFailure> {
    let doc: Value = serde_yaml::from_str(contents).map_err(ParseFailure::Yaml)?;
    let agents = doc
        .get("agents")
        .and_then(Value::as_mapping)
        .ok_or(ParseFailure::MissingAgents)?;

    let mut loaded = LoadedRegistry::default();
    for (key, value) in agents {
        let Some(raw) = key.as_str() else {
            loaded.rejected.push(RejectedEntry {
                key: format!("{key:?}"),
                reason: "registry key is not a string".to_string(),
            });
            continue;
        };
        if !AgentSlug::is_valid(raw) {
            loaded.rejected.push(RejectedEntry {
                key: raw.to_string(),
                reason: "slug must be lowercase words separated by '-' or '_'".to_string(),
            });
            continue;
        }
        if !value.is_mapping() {
            loaded.rejected.push(RejectedEntry {
                key: raw.to_string(),
                reason: "entry is not a mapping".to_string(),
            });
            continue;
        }
        match serde_yaml::from_value::<RegistryEntry>(value.clone()) {
            Ok(entry) => loaded.agents.push(AgentSpec::from_entry(AgentSlug::from(raw), entry)),
            Err(e) => loaded.rejected.push(RejectedEntry {
                key: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }
    loaded.agents.sort_by(|a, b| a.slug.cmp(&b.slug));
    reject_output_collisions(&mut loaded);
    Ok(loaded)
}

/// Slugs that differ only by `_`/`-` share output files; the first in sort order wins.
fn reject_output_collisions(loaded: &mut LoadedRegistry) {
    let mut taken: HashMap<String, String> = HashMap::new();
    let mut kept = Vec::with_capacity(loaded.agents.len());
    for agent in std::mem::take(&mut loaded.agents) {
        match taken.entry(agent.slug.hyphenated()) {
            Entry::Occupied(other) => loaded.rejected.push(RejectedEntry {
                key: agent.slug.0.clone(),
                reason: format!("collides with '{}' after '_'→'-' normalisation", other.get()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(agent.slug.0.clone());
                kept.push(agent);
            }
        }
    }
    loaded.agents = kept;
}

// ---------------------------------------------------------------------------
// 3. Builtin table
// ---------------------------------------------------------------------------

/// slug, description, max_iterations, tier hint
const BUILTIN_AGENTS: &[(&str, &str, u32, Tier)] = &[
    ("ai-engineer", "Builds MCP servers, AI integrations, and agent systems", 15, Tier::Standard),
    ("app-security", "Secures application code, OWASP vulnerabilities", 15, Tier::Standard),
    ("app-sre", "Application reliability and performance", 15, Tier::Standard),
    ("backend-engineer", "Builds APIs, services, and backend systems", 15, Tier::Standard),
    ("ceo-cto", "Strategic decisions and executive leadership", 10, Tier::Standard),
    ("cloud-engineer", "AWS infrastructure and cloud services", 15, Tier::Standard),
    ("code-reviewer", "Reviews code for quality, correctness, and best practices", 15, Tier::Complex),
    ("data-engineer", "Data pipelines, schemas, and ETL", 15, Tier::Standard),
    ("debugger", "Root cause analysis and debugging", 20, Tier::Complex),
    ("devops-engineer", "CI/CD pipelines and deployment automation", 15, Tier::Standard),
    ("frontend-engineer", "UI development and frontend systems", 15, Tier::Standard),
    ("hr-partner", "Performance reviews and feedback", 10, Tier::Standard),
    ("k8s-engineer", "Kubernetes deployment and operations", 15, Tier::Standard),
    ("platform-security", "K8s security, CIS benchmarks", 15, Tier::Standard),
    ("platform-sre", "Infrastructure reliability and monitoring", 15, Tier::Standard),
    ("product-manager", "Requirements, roadmap, and product strategy", 10, Tier::Standard),
    ("qa-engineer", "Test strategy and quality assurance", 15, Tier::Standard),
    ("security-engineer", "Organization-wide security policy", 15, Tier::Standard),
    ("solutions-architect", "Architecture design and scalability", 15, Tier::Complex),
    ("tdd-engineer", "Test-driven development", 15, Tier::Standard),
    ("tech-lead", "Technical decisions and planning", 15, Tier::Complex),
    ("tech-writer", "Documentation and technical writing", 12, Tier::Standard),
    ("ux-designer", "UI/UX design and user experience", 10, Tier::Standard),
    ("verifier", "Pre-completion verification checks", 15, Tier::Standard),
];

/// The in-code engineering agent table, resolved through the same tier policy.
pub fn builtin() -> LoadedRegistry {
    let agents = BUILTIN_AGENTS
        .iter()
        .map(|(slug, description, max_iterations, tier)| {
            AgentSpec::from_entry(
                AgentSlug::from(*slug),
                RegistryEntry {
                    description: (*description).to_string(),
                    team: None,
                    max_iterations: *max_iterations,
                    tier: Some(*tier),
                },
            )
        })
        .collect();
    LoadedRegistry { source: None, agents, rejected: vec![] }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, RegistryError> {
    dirs::home_dir().ok_or(RegistryError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
