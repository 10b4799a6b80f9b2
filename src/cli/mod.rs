//! CLI interface using clap.
//!
//! Flags override the configuration file, which overrides built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::application::OutputFormat;
use crate::domain::{AppConfig, ConversionPolicy, PipelineOptions};

/// Extract HEIC files from iCloud zip archives and convert them to PNG.
#[derive(Parser, Debug)]
#[command(name = "heic-converter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing iCloud zip files [default: ./zip]
    #[arg(long, value_name = "DIR")]
    pub zip_dir: Option<PathBuf>,

    /// Temporary directory for extracted files [default: ./extract]
    #[arg(long, value_name = "DIR")]
    pub extract_dir: Option<PathBuf>,

    /// Output directory for converted PNG files [default: ./convert]
    #[arg(long, value_name = "DIR")]
    pub convert_dir: Option<PathBuf>,

    /// Glob pattern for zip files [default: "*icloud*.zip"]
    #[arg(long, value_name = "GLOB")]
    pub zip_pattern: Option<String>,

    /// Folder inside the archives whose files are extracted [default: "icloud photos/"]
    #[arg(long, value_name = "PREFIX")]
    pub folder_prefix: Option<String>,

    /// Glob pattern for extracted files to convert [default: "*.heic"]
    #[arg(long, value_name = "GLOB")]
    pub image_pattern: Option<String>,

    /// Skip files that fail to decode instead of aborting the run.
    #[arg(long)]
    pub keep_going: bool,

    /// Configuration file (defaults to ./heic-converter.toml if present).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format: text, json, or table.
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose (debug) logging; repeat for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }

    /// Merge command-line overrides on top of a loaded configuration.
    #[must_use]
    pub fn resolve(&self, config: &AppConfig) -> PipelineOptions {
        let base = config.to_options();
        PipelineOptions {
            zip_dir: self.zip_dir.clone().unwrap_or(base.zip_dir),
            extract_dir: self.extract_dir.clone().unwrap_or(base.extract_dir),
            convert_dir: self.convert_dir.clone().unwrap_or(base.convert_dir),
            zip_pattern: self.zip_pattern.clone().unwrap_or(base.zip_pattern),
            folder_prefix: self.folder_prefix.clone().unwrap_or(base.folder_prefix),
            image_pattern: self.image_pattern.clone().unwrap_or(base.image_pattern),
            policy: if self.keep_going {
                ConversionPolicy::KeepGoing
            } else {
                base.policy
            },
        }
    }
}
