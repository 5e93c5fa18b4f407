//! Manifold core library: domain types, resource tiers, registry loading, errors.
//!
//! Public API surface:
//! - [`types`]: newtypes and domain structs
//! - [`tier`]: resource tier table and tier resolution policy
//! - [`error`]: [`RegistryError`]
//! - [`registry`]: load the agent registry from YAML or the builtin table

pub mod error;
pub mod registry;
pub mod tier;
pub mod types;

pub use error::RegistryError;
pub use registry::{LoadedRegistry, RejectedEntry};
pub use tier::{resolve_tier, ResourceTier, Tier};
pub use types::{AgentSlug, AgentSpec, RegistryEntry};
