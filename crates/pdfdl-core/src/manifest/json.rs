//! JSON manifests: an array of `{ "title": ..., "link": ... }` records.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::sanitize::title_to_filename;
use super::{ManifestError, Task};
use crate::config::FetchConfig;

/// One manifest record. Extra fields are ignored; both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub title: String,
    pub link: String,
}

/// Parses JSON manifest contents. Anything other than an array of complete
/// records is rejected as a whole.
pub fn parse_json_manifest(
    contents: &str,
    cfg: &FetchConfig,
) -> Result<Vec<Task>, serde_json::Error> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(contents)?;
    let mut tasks = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(local_filename) = title_to_filename(&entry.title, &cfg.extension) else {
            tracing::warn!("Skipping entry with empty title (link {})", entry.link);
            continue;
        };
        tasks.push(Task {
            remote_url: cfg.remote_url(&entry.link),
            local_filename,
        });
    }
    Ok(tasks)
}

pub fn read_json_manifest(path: &Path, cfg: &FetchConfig) -> Result<Vec<Task>, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_manifest(&contents, cfg).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}
