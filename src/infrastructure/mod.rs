//! Infrastructure layer - external adapters (archives, codecs, config files).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod archive_reader;
pub mod config;
pub mod glob;
pub mod image_codec;

pub use archive_reader::ArchiveReader;
pub use config::{load_config, render_config};
pub use glob::GlobPattern;
