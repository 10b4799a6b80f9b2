//! Domain layer - core types shared by every pipeline stage.
//!
//! This layer contains plain data models, configuration and error types
//! without any filesystem access.

pub mod error;
pub mod models;
pub mod settings;

pub use error::{AppError, Result};
pub use models::{ConversionPolicy, ConversionReport, PipelineOptions, RunSummary, SkippedFile};
pub use settings::AppConfig;
