//! Selective extraction of photo folders from zip archives.
//!
//! Entries under the configured folder prefix are flattened into a single
//! directory; everything else in the archive is left alone.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Result};
use crate::infrastructure::ArchiveReader;

/// Extracts every entry under `folder_prefix` from one archive into
/// `extract_dir`, flattening any subfolders.
///
/// Existing files with the same name are overwritten. Returns the written
/// paths in archive order.
///
/// # Errors
/// Returns error if the archive cannot be opened or read, or a file cannot
/// be written.
pub fn extract_from_archive(
    archive_path: &Path,
    extract_dir: &Path,
    folder_prefix: &str,
) -> Result<Vec<PathBuf>> {
    let mut reader = ArchiveReader::open(archive_path)?;
    let mut extracted = Vec::new();

    for entry in reader.entries()? {
        let Some(file_name) = destination_name(&entry.name, folder_prefix) else {
            continue;
        };
        if entry.is_dir {
            continue;
        }

        let data = reader.read_entry(entry.index)?;
        let dest = extract_dir.join(file_name);
        fs::write(&dest, &data)
            .map_err(|e| AppError::io(format!("Failed to write {}", dest.display()), e))?;

        tracing::debug!("Extracted {}", dest.display());
        extracted.push(dest);
    }

    let archive_name = archive_path.file_name().unwrap_or(archive_path.as_os_str());
    tracing::info!(
        "Extracted {} file(s) from {}",
        extracted.len(),
        archive_name.to_string_lossy()
    );

    Ok(extracted)
}

/// Flattened file name for an entry, or `None` if the entry is outside the
/// prefix or names a directory.
fn destination_name<'a>(entry_name: &'a str, folder_prefix: &str) -> Option<&'a str> {
    let remainder = strip_prefix_ignore_case(entry_name, folder_prefix)?;
    let name = remainder.rsplit('/').next().unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." {
        tracing::debug!(entry = entry_name, "Skipping directory entry");
        return None;
    }
    Some(name)
}

/// Strips `prefix` from `s` if the lower-cased `s` starts with the lower-cased
/// `prefix`.
///
/// A prefix ending inside the lower-case expansion of a character (`İ` lowers
/// to two characters) still matches; the remainder starts after that character.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.to_lowercase();
    if !s.to_lowercase().starts_with(&prefix) {
        return None;
    }

    let mut lowered = 0;
    for (idx, ch) in s.char_indices() {
        if lowered >= prefix.len() {
            return Some(&s[idx..]);
        }
        lowered += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    Some(&s[s.len()..])
}
