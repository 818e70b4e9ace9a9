//! Task enumeration from manifest files.
//!
//! A manifest directory holds plain-text (`*.txt`, one path segment per line)
//! and JSON (`*.json`, array of `{title, link}` records) manifests. Each one is
//! turned into download [`Task`]s; a broken manifest is logged and skipped.

mod extract;
mod json;
mod sanitize;
mod text;

pub use extract::{
    extract_pdf_items, extract_pdf_paths, write_json_manifest, write_text_manifest,
};
pub use json::{parse_json_manifest, read_json_manifest, ManifestEntry};
pub use sanitize::{sanitize_title, title_to_filename, MAX_TITLE_CHARS};
pub use text::{filename_from_segment, parse_text_manifest, read_text_manifest};

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;

/// One file to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub remote_url: String,
    pub local_filename: String,
}

/// Manifest format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Text,
    Json,
}

impl ManifestKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "txt" => Some(ManifestKind::Text),
            "json" => Some(ManifestKind::Json),
            _ => None,
        }
    }
}

/// An unreadable or malformed manifest file. Never fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not an array of {{title, link}} records: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Manifest files in `dir`, sorted by file name.
pub fn list_manifests(dir: &Path) -> std::io::Result<Vec<(PathBuf, ManifestKind)>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(kind) = ManifestKind::from_path(&path) {
            found.push((path, kind));
        }
    }
    found.sort_by(|a, b| a.0.file_name().cmp(&b.0.file_name()));
    Ok(found)
}

/// Reads one manifest of the given kind.
pub fn read_manifest(
    path: &Path,
    kind: ManifestKind,
    cfg: &FetchConfig,
) -> Result<Vec<Task>, ManifestError> {
    match kind {
        ManifestKind::Text => read_text_manifest(path, cfg),
        ManifestKind::Json => read_json_manifest(path, cfg),
    }
}

/// Builds the task list from every manifest in `cfg.manifest_dir`.
///
/// Errors for individual files are logged and the remaining files are still
/// processed. A missing directory yields an empty list; the caller decides
/// what an empty list means.
pub fn enumerate_tasks(cfg: &FetchConfig) -> Vec<Task> {
    let dir = &cfg.manifest_dir;
    let manifests = match list_manifests(dir) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!("Manifest directory not readable: {} ({})", dir.display(), e);
            return Vec::new();
        }
    };

    let mut tasks = Vec::new();
    for (path, kind) in manifests {
        tracing::info!("Processing manifest: {}", path.display());
        match read_manifest(&path, kind, cfg) {
            Ok(found) => {
                tracing::debug!("{} task(s) from {}", found.len(), path.display());
                tasks.extend(found);
            }
            Err(e @ ManifestError::Json { .. }) => tracing::warn!("Skipping manifest: {}", e),
            Err(e) => tracing::error!("{}", e),
        }
    }
    tasks
}
