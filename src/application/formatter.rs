//! Output formatting for run summaries.
//!
//! Supports multiple output formats: plain text, JSON, and table view.

use std::path::Path;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::RunSummary;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The one-line summary.
    #[default]
    Text,
    /// JSON format for programmatic use.
    Json,
    /// Table of every file followed by the summary line.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: text, json, table")),
        }
    }
}

/// Renders a summary in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_summary(
    summary: &RunSummary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(summary.summary_line()),
        OutputFormat::Json => serde_json::to_string_pretty(summary),
        OutputFormat::Table => Ok(format_summary_table(summary)),
    }
}

/// Formats every extracted, converted and skipped file as a table.
pub fn format_summary_table(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stage", "File", "Details"]);

    for path in &summary.extracted {
        table.add_row(vec!["extracted", &file_name(path), ""]);
    }
    for path in &summary.converted {
        table.add_row(vec!["converted", &file_name(path), &path.display().to_string()]);
    }
    for skipped in &summary.skipped {
        table.add_row(vec![
            "skipped",
            &file_name(&skipped.path),
            &truncate(&skipped.reason, 60),
        ]);
    }

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&summary.summary_line().bold().to_string());
    if !summary.skipped.is_empty() {
        out.push('\n');
        out.push_str(
            &format!("{} file(s) skipped", summary.skipped.len())
                .yellow()
                .to_string(),
        );
    }
    out
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{cut}...")
    }
}
