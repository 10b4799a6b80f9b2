//! Archive discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Result};
use crate::infrastructure::GlobPattern;

/// Lists regular files directly inside `dir` whose name matches `pattern`.
///
/// Results are sorted by file name. Directories never match, whatever
/// their name.
///
/// # Errors
/// Returns error if the directory cannot be read.
pub fn find_matching_files(dir: &Path, pattern: &GlobPattern) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::io(format!("Failed to read directory {}", dir.display()), e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name();
        if pattern.matches(&name.to_string_lossy()) {
            tracing::debug!(file = %path.display(), pattern = pattern.as_str(), "Matched");
            matches.push(path);
        }
    }

    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(matches)
}

/// Finds the archives in `zip_dir` selected by the zip name pattern.
///
/// # Errors
/// Returns error if the directory cannot be read.
pub fn find_matching_archives(zip_dir: &Path, pattern: &GlobPattern) -> Result<Vec<PathBuf>> {
    let archives = find_matching_files(zip_dir, pattern)?;

    tracing::info!(
        "Found {} archive(s) matching '{}' in {}",
        archives.len(),
        pattern.as_str(),
        zip_dir.display()
    );

    Ok(archives)
}
