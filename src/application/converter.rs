//! Image conversion to PNG.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, ConversionPolicy, ConversionReport, Result, SkippedFile};
use crate::infrastructure::{image_codec, GlobPattern};

use super::scanner::find_matching_files;

/// Converts a single image file to PNG inside `output_dir`.
///
/// The output keeps the source file's stem, e.g. `photo.heic` becomes
/// `photo.png`. `output_dir` is created if missing.
///
/// # Errors
/// Returns a codec error if the file cannot be decoded, or an IO error if
/// it cannot be read or the directory cannot be created.
pub fn convert_file(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| {
        AppError::io(
            format!("Failed to create directory {}", output_dir.display()),
            e,
        )
    })?;

    let stem = source.file_stem().ok_or_else(|| AppError::Codec {
        path: source.to_path_buf(),
        message: "File has no name".into(),
        source: None,
    })?;
    let mut file_name = stem.to_os_string();
    file_name.push(".png");
    let png_path = output_dir.join(file_name);

    let bytes = fs::read(source)
        .map_err(|e| AppError::io(format!("Failed to read {}", source.display()), e))?;
    let image = image_codec::decode(source, &bytes)?;
    image_codec::save_png(&image, &png_path)?;

    tracing::info!(
        "Converted {} → {}",
        display_name(source),
        display_name(&png_path)
    );

    Ok(png_path)
}

/// Converts every file in `extract_dir` matching `pattern` into `output_dir`.
///
/// Under [`ConversionPolicy::FailFast`] the first codec error aborts; under
/// [`ConversionPolicy::KeepGoing`] it is logged and the file is reported as
/// skipped. Filesystem errors always abort.
///
/// # Errors
/// Returns error if the directory cannot be listed or a conversion fails
/// under the fail-fast policy.
pub fn convert_directory(
    extract_dir: &Path,
    output_dir: &Path,
    pattern: &GlobPattern,
    policy: ConversionPolicy,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();

    for source in find_matching_files(extract_dir, pattern)? {
        match convert_file(&source, output_dir) {
            Ok(png) => report.converted.push(png),
            Err(err @ AppError::Codec { .. }) if policy == ConversionPolicy::KeepGoing => {
                tracing::warn!("Skipping {}: {}", source.display(), err);
                report.skipped.push(SkippedFile {
                    path: source,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
