//! # manifold-renderer
//!
//! Tera-based template engine that renders per-agent Kubernetes manifests
//! from registry data, plus the Terraform and ExternalSecret snippets the
//! namespace tools hand back to their callers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use manifold_renderer::{ManifestKind, Renderer};
//! use manifold_core::registry;
//!
//! fn render_all() {
//!     let renderer = Renderer::new().expect("embedded templates");
//!     for spec in &registry::builtin().agents {
//!         if let Ok(pair) = renderer.render_pair(spec) {
//!             for kind in ManifestKind::all() {
//!                 println!("{:?} {}: {} bytes", kind, spec.slug, pair.get(*kind).len());
//!             }
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{ManifestContext, NamespaceModuleCtx, SecretMappingContext, CLUSTER};
pub use engine::{ManifestKind, ManifestPair, Renderer};
pub use error::RenderError;
