//! Configuration file model.
//!
//! Every field is optional so a partial file only overrides what it names.
//! Command-line flags take precedence over anything read here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::models::{ConversionPolicy, PipelineOptions};

/// Directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory containing the zip archives.
    #[serde(default)]
    pub zip_dir: Option<PathBuf>,

    /// Temporary extraction directory.
    #[serde(default)]
    pub extract_dir: Option<PathBuf>,

    /// Output directory for PNG files.
    #[serde(default)]
    pub convert_dir: Option<PathBuf>,
}

/// File and entry matching configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Glob for zip file names.
    #[serde(default)]
    pub zip_pattern: Option<String>,

    /// Folder prefix inside the archives.
    #[serde(default)]
    pub folder_prefix: Option<String>,

    /// Glob for extracted files to convert.
    #[serde(default)]
    pub image_pattern: Option<String>,
}

/// Conversion stage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Skip undecodable files instead of aborting.
    #[serde(default)]
    pub keep_going: bool,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub matching: MatchConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl AppConfig {
    /// Configuration with every default spelled out, as printed by `--print-config`.
    #[must_use]
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self {
            paths: PathConfig {
                zip_dir: Some(options.zip_dir.clone()),
                extract_dir: Some(options.extract_dir.clone()),
                convert_dir: Some(options.convert_dir.clone()),
            },
            matching: MatchConfig {
                zip_pattern: Some(options.zip_pattern.clone()),
                folder_prefix: Some(options.folder_prefix.clone()),
                image_pattern: Some(options.image_pattern.clone()),
            },
            conversion: ConversionConfig {
                keep_going: options.policy == ConversionPolicy::KeepGoing,
            },
        }
    }

    /// Fill in built-in defaults for everything the file leaves unset.
    #[must_use]
    pub fn to_options(&self) -> PipelineOptions {
        let defaults = PipelineOptions::default();
        PipelineOptions {
            zip_dir: self.paths.zip_dir.clone().unwrap_or(defaults.zip_dir),
            extract_dir: self
                .paths
                .extract_dir
                .clone()
                .unwrap_or(defaults.extract_dir),
            convert_dir: self
                .paths
                .convert_dir
                .clone()
                .unwrap_or(defaults.convert_dir),
            zip_pattern: self
                .matching
                .zip_pattern
                .clone()
                .unwrap_or(defaults.zip_pattern),
            folder_prefix: self
                .matching
                .folder_prefix
                .clone()
                .unwrap_or(defaults.folder_prefix),
            image_pattern: self
                .matching
                .image_pattern
                .clone()
                .unwrap_or(defaults.image_pattern),
            policy: ConversionPolicy::from_keep_going(self.conversion.keep_going),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{DEFAULT_FOLDER_PREFIX, DEFAULT_ZIP_PATTERN};

    #[test]
    fn test_empty_config_uses_defaults() {
        let options = AppConfig::default().to_options();
        assert_eq!(options.zip_dir, PathBuf::from("zip"));
        assert_eq!(options.extract_dir, PathBuf::from("extract"));
        assert_eq!(options.convert_dir, PathBuf::from("convert"));
        assert_eq!(options.zip_pattern, DEFAULT_ZIP_PATTERN);
        assert_eq!(options.folder_prefix, DEFAULT_FOLDER_PREFIX);
        assert_eq!(options.policy, ConversionPolicy::FailFast);
    }

    #[test]
    fn test_options_survive_config_round_trip() {
        let options = PipelineOptions {
            zip_dir: PathBuf::from("/data/archives"),
            policy: ConversionPolicy::KeepGoing,
            ..Default::default()
        };
        let back = AppConfig::from_options(&options).to_options();
        assert_eq!(back.zip_dir, PathBuf::from("/data/archives"));
        assert_eq!(back.policy, ConversionPolicy::KeepGoing);
    }
}
