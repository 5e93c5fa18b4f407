//! Resource tiers and the tier resolution policy.
//!
//! | Tier      | requests cpu/mem | limits cpu/mem |
//! |-----------|------------------|----------------|
//! | standard  | 100m / 256Mi     | 500m / 1Gi     |
//! | complex   | 250m / 512Mi     | 1 / 2Gi        |
//! | executive | 200m / 512Mi     | 750m / 1.5Gi   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::AgentSlug;

/// Team whose members always run on the executive tier.
pub const EXECUTIVE_TEAM: &str = "Executive";

/// Slugs that always get the complex tier (unless on the executive team).
pub const COMPLEX_OVERRIDES: &[&str] = &[
    "code-reviewer",
    "debugger",
    "solutions-architect",
    "tech-lead",
];

/// Named bundle of CPU/memory requests and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Complex,
    Executive,
}

/// Kubernetes resource quantities for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTier {
    pub requests_cpu: &'static str,
    pub requests_memory: &'static str,
    pub limits_cpu: &'static str,
    pub limits_memory: &'static str,
}

const STANDARD: ResourceTier = ResourceTier {
    requests_cpu: "100m",
    requests_memory: "256Mi",
    limits_cpu: "500m",
    limits_memory: "1Gi",
};

const COMPLEX: ResourceTier = ResourceTier {
    requests_cpu: "250m",
    requests_memory: "512Mi",
    limits_cpu: "1",
    limits_memory: "2Gi",
};

const EXECUTIVE: ResourceTier = ResourceTier {
    requests_cpu: "200m",
    requests_memory: "512Mi",
    limits_cpu: "750m",
    limits_memory: "1.5Gi",
};

impl Tier {
    /// All tiers in a stable order.
    pub fn all() -> &'static [Tier] {
        &[Tier::Standard, Tier::Complex, Tier::Executive]
    }

    pub fn resources(&self) -> &'static ResourceTier {
        match self {
            Tier::Standard => &STANDARD,
            Tier::Complex => &COMPLEX,
            Tier::Executive => &EXECUTIVE,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Standard => write!(f, "standard"),
            Tier::Complex => write!(f, "complex"),
            Tier::Executive => write!(f, "executive"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Tier::Standard),
            "complex" => Ok(Tier::Complex),
            "executive" => Ok(Tier::Executive),
            other => Err(format!(
                "unknown tier '{other}'; expected: standard, complex, executive"
            )),
        }
    }
}

/// Resolve the tier for an agent.
///
/// Order: executive team, then the complex override set (matched on the
/// hyphenated slug), then the registry hint, then standard.
pub fn resolve_tier(slug: &AgentSlug, team: Option<&str>, hint: Option<Tier>) -> Tier {
    if team == Some(EXECUTIVE_TEAM) {
        return Tier::Executive;
    }
    let hyphenated = slug.hyphenated();
    if COMPLEX_OVERRIDES.contains(&hyphenated.as_str()) {
        return Tier::Complex;
    }
    hint.unwrap_or_default()
}
