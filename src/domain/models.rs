//! Domain models for a conversion run.
//!
//! Archives and their entries never leave the extractor; these types carry
//! only what a caller gets to see: which files were produced where.

use std::path::PathBuf;

use serde::Serialize;

/// Default glob selecting zip archives in the source directory.
pub const DEFAULT_ZIP_PATTERN: &str = "*icloud*.zip";
/// Default folder prefix of eligible archive entries.
pub const DEFAULT_FOLDER_PREFIX: &str = "icloud photos/";
/// Default glob selecting extracted files for conversion.
pub const DEFAULT_IMAGE_PATTERN: &str = "*.heic";

/// What to do when a file matches the conversion pattern but cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionPolicy {
    /// Abort the whole run on the first failure.
    #[default]
    FailFast,
    /// Log the failure, record the file as skipped and continue.
    KeepGoing,
}

impl ConversionPolicy {
    #[must_use]
    pub const fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            Self::KeepGoing
        } else {
            Self::FailFast
        }
    }
}

/// Fully resolved inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory holding the zip archives (must exist).
    pub zip_dir: PathBuf,
    /// Transient staging directory, removed at the end of the run.
    pub extract_dir: PathBuf,
    /// Persistent output directory for PNG files.
    pub convert_dir: PathBuf,
    /// Glob selecting archives by file name.
    pub zip_pattern: String,
    /// Folder prefix of archive entries to extract.
    pub folder_prefix: String,
    /// Glob selecting extracted files to convert.
    pub image_pattern: String,
    /// Failure policy for the conversion stage.
    pub policy: ConversionPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            zip_dir: PathBuf::from("zip"),
            extract_dir: PathBuf::from("extract"),
            convert_dir: PathBuf::from("convert"),
            zip_pattern: DEFAULT_ZIP_PATTERN.to_string(),
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            image_pattern: DEFAULT_IMAGE_PATTERN.to_string(),
            policy: ConversionPolicy::FailFast,
        }
    }
}

/// A file the converter gave up on in keep-going mode.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// The extracted file that failed.
    pub path: PathBuf,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Output of the conversion stage.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// PNG files written, in directory order.
    pub converted: Vec<PathBuf>,
    /// Files skipped under the keep-going policy.
    pub skipped: Vec<SkippedFile>,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Files pulled out of the archives, in scan order.
    pub extracted: Vec<PathBuf>,
    /// PNG files written.
    pub converted: Vec<PathBuf>,
    /// Files that failed to convert in keep-going mode.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    #[must_use]
    pub fn extracted_count(&self) -> usize {
        self.extracted.len()
    }

    #[must_use]
    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }

    /// One-line summary printed at the end of a successful run.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Extracted {} file(s), converted {} file(s).",
            self.extracted_count(),
            self.converted_count()
        )
    }
}
