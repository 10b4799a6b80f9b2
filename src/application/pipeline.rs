//! End-to-end run: scan, extract, convert, clean up.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, PipelineOptions, Result, RunSummary};
use crate::infrastructure::GlobPattern;

use super::converter::convert_directory;
use super::extractor::extract_from_archive;
use super::scanner::find_matching_archives;

/// Processes every matching archive in `options.zip_dir`.
///
/// 1. Extract photos from each archive into `extract_dir`.
/// 2. Convert every matching file in `extract_dir` to PNG in `convert_dir`.
/// 3. Remove `extract_dir` and its contents.
///
/// Nothing touches the filesystem before the zip directory and both glob
/// patterns have been validated. If a stage fails, `extract_dir` is left
/// in place.
///
/// # Errors
/// Returns [`AppError::ZipDirNotFound`] if the zip directory is missing, a
/// configuration error for an invalid pattern, and otherwise the first
/// archive, codec or IO failure.
pub fn process_zip_dir(options: &PipelineOptions) -> Result<RunSummary> {
    if !options.zip_dir.is_dir() {
        return Err(AppError::ZipDirNotFound {
            path: options.zip_dir.clone(),
        });
    }

    let zip_pattern = GlobPattern::new(&options.zip_pattern)?;
    let image_pattern = GlobPattern::new(&options.image_pattern)?;

    create_dir(&options.extract_dir)?;
    create_dir(&options.convert_dir)?;

    let mut extracted = Vec::new();
    for archive in find_matching_archives(&options.zip_dir, &zip_pattern)? {
        extracted.extend(extract_from_archive(
            &archive,
            &options.extract_dir,
            &options.folder_prefix,
        )?);
    }

    let report = convert_directory(
        &options.extract_dir,
        &options.convert_dir,
        &image_pattern,
        options.policy,
    )?;

    fs::remove_dir_all(&options.extract_dir).map_err(|e| {
        AppError::io(
            format!(
                "Failed to remove extract directory {}",
                options.extract_dir.display()
            ),
            e,
        )
    })?;
    tracing::info!(
        "Removed temporary extract directory: {}",
        options.extract_dir.display()
    );

    Ok(RunSummary {
        extracted,
        converted: report.converted,
        skipped: report.skipped,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| AppError::io(format!("Failed to create directory {}", path.display()), e))
}
