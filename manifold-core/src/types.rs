//! Domain types for the Manifold agent registry.
//!
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tier::{resolve_tier, ResourceTier, Tier};

/// Iteration budget applied when a registry entry does not set one.
pub const DEFAULT_MAX_ITERATIONS: u32 = 15;

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+([-_][a-z0-9]+)*$").expect("valid slug regex"));

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed agent identifier from the registry (e.g. `code-reviewer`).
///
/// Registry keys may use `_` or `-` as separators; Kubernetes object names and
/// output file names use [`AgentSlug::hyphenated`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentSlug(pub String);

impl AgentSlug {
    /// Lowercase alphanumeric words joined by single `-` or `_`.
    pub fn is_valid(raw: &str) -> bool {
        SLUG_REGEX.is_match(raw)
    }

    /// The slug with every `_` replaced by `-`.
    pub fn hyphenated(&self) -> String {
        self.0.replace('_', "-")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AgentSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Registry entry (on-disk shape)
// ---------------------------------------------------------------------------

/// One value under the registry's `agents:` mapping, before tier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Tier hint; team and override rules take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

// ---------------------------------------------------------------------------
// AgentSpec
// ---------------------------------------------------------------------------

/// A fully resolved agent, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub slug: AgentSlug,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub max_iterations: u32,
    pub tier: Tier,
}

impl AgentSpec {
    /// Build a spec from a registry entry, resolving its tier.
    ///
    /// An empty `team` string is treated as no team.
    pub fn from_entry(slug: AgentSlug, entry: RegistryEntry) -> Self {
        let team = entry.team.filter(|t| !t.trim().is_empty());
        let tier = resolve_tier(&slug, team.as_deref(), entry.tier);
        AgentSpec {
            slug,
            description: entry.description,
            team,
            max_iterations: entry.max_iterations,
            tier,
        }
    }

    /// Resource quantities for this agent's tier.
    pub fn resources(&self) -> &'static ResourceTier {
        self.tier.resources()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
