//! Domain-level error types for heic-converter.
//!
//! All errors are typed with `thiserror`. Only configuration errors are
//! expected in normal use; everything else aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The zip source directory does not exist.
    #[error("Zip directory not found: {}", .path.display())]
    ZipDirNotFound { path: PathBuf },

    /// Invalid configuration file or glob pattern.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A selected file is not a readable zip archive.
    #[error("Archive error in {}: {message}", .path.display())]
    Archive {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<zip::result::ZipError>,
    },

    /// A file matched the conversion pattern but could not be decoded or encoded.
    #[error("Image codec error for {}: {message}", .path.display())]
    Codec {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// The run summary could not be serialized for output.
    #[error("Output error: {message}")]
    Output {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create an archive error from a zip error.
    pub fn archive(path: impl Into<PathBuf>, err: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a codec error from an image error.
    pub fn codec(path: impl Into<PathBuf>, err: image::ImageError) -> Self {
        Self::Codec {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an output error from a JSON serialization failure.
    pub fn output(err: serde_json::Error) -> Self {
        Self::Output {
            message: format!("Failed to serialize summary: {err}"),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Whether this error was caused by bad input configuration rather than
    /// a failure while processing files.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ZipDirNotFound { .. } | Self::Config { .. })
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_dir_not_found_names_path() {
        let err = AppError::ZipDirNotFound {
            path: PathBuf::from("/nowhere/zip"),
        };
        assert_eq!(err.to_string(), "Zip directory not found: /nowhere/zip");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_io_error_is_not_configuration() {
        let err = AppError::io(
            "Failed to read",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_configuration());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_output_error_is_not_configuration() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = AppError::output(json_err);
        assert!(!err.is_configuration());
        assert!(err.to_string().starts_with("Output error: Failed to serialize summary"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
