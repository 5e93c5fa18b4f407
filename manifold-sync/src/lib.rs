//! # manifold-sync
//!
//! Manifest generation pipeline and hash-gated atomic writer.
//!
//! Call [`generate`] to gate, render and write every agent in a loaded
//! registry, or [`diff_manifests`] to see what a run would change.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_manifests, FileDiff};
pub use error::SyncError;
pub use pipeline::{generate, GenerateOptions, GenerateReport, GeneratedAgent, SkippedAgent};
pub use writer::WriteResult;
