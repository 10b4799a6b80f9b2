//! HEIC Converter - Extract iCloud photos from zip archives and convert them to PNG.
//!
//! Reads every `*icloud*.zip` in the zip directory, flattens the files under
//! each archive's `iCloud Photos/` folder into a temporary directory,
//! converts the HEIC files among them to PNG and removes the temporary
//! directory again.
//!
//!   heic-converter                                  # ./zip -> ./convert
//!   heic-converter --zip-dir ~/Downloads -v         # custom source, debug logs
//!   heic-converter --keep-going --format table      # skip broken files, list results
//!   heic-converter --print-config > heic-converter.toml

mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_summary, process_zip_dir};
use cli::Cli;
use infrastructure::{load_config, render_config};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    std::process::exit(execute(&cli));
}

/// Runs the CLI and maps the outcome to a process exit code.
fn execute(cli: &Cli) -> i32 {
    match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if !e.is_configuration() && !matches!(e, domain::AppError::Output { .. }) {
                eprintln!(
                    "{} the extract directory may hold partial data; rerunning overwrites it",
                    "Note:".yellow()
                );
            }
            1
        }
    }
}

/// Main application logic.
fn run(cli: &Cli) -> domain::Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| domain::AppError::Config { message: e })?;

    let config = load_config(cli.config.as_deref())?;
    let options = cli.resolve(&config);

    if cli.print_config {
        print!("{}", render_config(&domain::AppConfig::from_options(&options))?);
        return Ok(());
    }

    tracing::debug!(?options, "Resolved options");

    let summary = process_zip_dir(&options)?;

    let output = format_summary(&summary, format).map_err(domain::AppError::output)?;
    println!("{output}");

    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::archive_reader::test_support::make_zip;
    use crate::infrastructure::image_codec::test_support::png_bytes;
    use std::fs;
    use tempfile::tempdir;

    fn cli_for(root: &std::path::Path, zip_dir: &str, extra: &[&str]) -> Cli {
        let mut args = vec![
            "heic-converter".to_string(),
            "--zip-dir".to_string(),
            root.join(zip_dir).display().to_string(),
            "--extract-dir".to_string(),
            root.join("extract").display().to_string(),
            "--convert-dir".to_string(),
            root.join("convert").display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    #[test]
    fn test_returns_zero_on_success() {
        let root = tempdir().unwrap();
        let zip_dir = root.path().join("zip");
        fs::create_dir(&zip_dir).unwrap();
        make_zip(
            &zip_dir.join("icloud_photos.zip"),
            &[("iCloud Photos/photo.HEIC", png_bytes(4, 4).as_slice())],
        );

        let code = execute(&cli_for(root.path(), "zip", &[]));

        assert_eq!(code, 0);
        assert!(root.path().join("convert/photo.png").exists());
        assert!(!root.path().join("extract").exists());
    }

    #[test]
    fn test_returns_one_when_zip_dir_missing() {
        let root = tempdir().unwrap();

        let code = execute(&cli_for(root.path(), "no_such_dir", &[]));

        assert_eq!(code, 1);
        assert!(!root.path().join("extract").exists());
        assert!(!root.path().join("convert").exists());
    }

    #[test]
    fn test_returns_one_for_unknown_format() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("zip")).unwrap();

        let code = execute(&cli_for(root.path(), "zip", &["--format", "yaml"]));

        assert_eq!(code, 1);
        assert!(!root.path().join("convert").exists());
    }

    #[test]
    fn test_print_config_touches_nothing() {
        let root = tempdir().unwrap();

        let code = execute(&cli_for(root.path(), "zip", &["--print-config"]));

        assert_eq!(code, 0);
        assert!(!root.path().join("convert").exists());
    }

    #[test]
    fn test_config_file_is_applied() {
        let root = tempdir().unwrap();
        let zip_dir = root.path().join("zip");
        fs::create_dir(&zip_dir).unwrap();
        make_zip(
            &zip_dir.join("archive.zip"),
            &[("Pics/a.heic", png_bytes(2, 2).as_slice())],
        );
        let config_path = root.path().join("custom.toml");
        fs::write(
            &config_path,
            "[matching]\nzip_pattern = \"archive*.zip\"\nfolder_prefix = \"pics/\"\n",
        )
        .unwrap();

        let code = execute(&cli_for(
            root.path(),
            "zip",
            &["--config", &config_path.display().to_string()],
        ));

        assert_eq!(code, 0);
        assert!(root.path().join("convert/a.png").exists());
    }
}
