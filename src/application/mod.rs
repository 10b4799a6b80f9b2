//! Application layer - pipeline stages and orchestration.
//!
//! Each stage is a plain function; `pipeline` composes them in order.

pub mod converter;
pub mod extractor;
pub mod formatter;
pub mod pipeline;
pub mod scanner;

pub use formatter::{format_summary, OutputFormat};
pub use pipeline::process_zip_dir;
