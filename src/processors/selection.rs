//! Latest-file selection over subsystem log folders.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Return up to `n` `.csv` files in `folder`, most recently modified
/// first.
///
/// The suffix match is case-insensitive and only regular files are
/// considered. A missing folder yields an empty list rather than an
/// error: a subsystem that has not produced output yet this session is a
/// warning, not a failure. Ties in modification time keep the directory
/// listing order (stable sort), which is deterministic within a run.
///
/// # Arguments
///
/// * `folder` - Folder to scan (not recursed into)
/// * `n` - Maximum number of paths to return
///
/// # Errors
///
/// Returns an error only when an existing folder cannot be listed.
pub fn latest_csv_files(folder: &Path, n: usize) -> io::Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<(PathBuf, SystemTime)> = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_csv_extension(&path) {
            continue;
        }
        let modified = entry
            .metadata()?
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.push((path, modified));
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(n);

    Ok(candidates.into_iter().map(|(path, _)| path).collect())
}

fn has_csv_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .unwrap_or(false)
}
