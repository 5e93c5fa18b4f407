//! Dry-run unified diff support for `manifold diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use manifold_core::LoadedRegistry;
use manifold_detector::check_source;
use manifold_renderer::{ManifestKind, Renderer};

use crate::{error::io_err, writer::normalize_line_endings, GenerateOptions, SyncError};

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `generate` would write and compare it to current on-disk content.
///
/// Agents that fail the source gate are left out, exactly as `generate`
/// would skip them. No files are written; `opts.dry_run` is ignored.
pub fn diff_manifests(
    registry: &LoadedRegistry,
    renderer: &Renderer,
    opts: &GenerateOptions,
) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for spec in &registry.agents {
        if !check_source(&opts.source_root, &spec.slug).is_ready() {
            continue;
        }

        let pair = renderer.render_pair(spec)?;
        let name = spec.slug.hyphenated();
        for kind in ManifestKind::all() {
            let path = kind.output_path(&opts.output_dir, &name);
            let rendered = normalize_line_endings(pair.get(*kind));
            let existing = read_existing_or_empty(&path)?;
            if existing == rendered {
                continue;
            }

            let relative = path.strip_prefix(&opts.output_dir).unwrap_or(path.as_path());
            let old_header = format!("a/{}", relative.display());
            let new_header = format!("b/{}", relative.display());
            let unified = TextDiff::from_lines(&existing, &rendered)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string();

            diffs.push(FileDiff {
                path,
                unified_diff: unified,
            });
        }
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
