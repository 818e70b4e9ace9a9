//! Writing fetched payloads: temp file in the output directory, then atomic rename.

use std::io::{self, Write};
use std::path::Path;

/// Temporary file suffix used before the rename onto the final name.
pub const TEMP_SUFFIX: &str = ".part";

/// Writes `data` to `target`, replacing any existing file.
/// Readers see either the old file or the complete new one, never a partial write.
pub fn write_atomically(target: &Path, data: &[u8]) -> io::Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".pdfdl-")
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
