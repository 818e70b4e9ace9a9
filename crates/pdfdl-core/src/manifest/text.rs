//! Plain-text manifests: one path segment per non-blank line.

use std::fs;
use std::path::Path;

use super::{ManifestError, Task};
use crate::config::FetchConfig;

/// Last `/`-separated component of a path segment.
pub fn filename_from_segment(segment: &str) -> &str {
    segment.rsplit('/').next().unwrap_or(segment)
}

/// Builds tasks from plain-text manifest contents.
/// Segments whose derived filename lacks the configured extension are skipped with a warning.
pub fn parse_text_manifest(contents: &str, cfg: &FetchConfig) -> Vec<Task> {
    let mut tasks = Vec::new();
    for segment in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let filename = filename_from_segment(segment);
        if !filename.ends_with(cfg.extension.as_str()) {
            tracing::warn!("Skipping invalid filename: {}", filename);
            continue;
        }
        tasks.push(Task {
            remote_url: cfg.remote_url(segment),
            local_filename: filename.to_string(),
        });
    }
    tasks
}

pub fn read_text_manifest(path: &Path, cfg: &FetchConfig) -> Result<Vec<Task>, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_text_manifest(&contents, cfg))
}
