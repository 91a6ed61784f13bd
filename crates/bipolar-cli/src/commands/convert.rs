//! Convert command
//!
//! Discover every session in the export directory and write its GPX, HRM
//! and TCX files.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use bipolar_core::events::TracingSink;
use bipolar_core::export::{BatchReport, ExportDriver, ExportOptions, FormatOutcome, SessionOutcome};
use bipolar_core::session::SessionGrouper;
use bipolar_integration::{resolve_export_dir, CommandParserFactory};
use bipolar_storage::LocalExportDir;

use crate::exit_codes::{EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Export directory to scan (default: from config, then FlowSync)
    #[arg(long, short)]
    pub dir: Option<PathBuf>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, config_path: &Path) -> Result<i32> {
    let config = super::load_config(config_path)?;
    let export_dir = resolve_export_dir(&config, args.dir.as_deref())?;
    tracing::info!("Scanning {}", export_dir.display());

    let fs = LocalExportDir::new();
    let sink = TracingSink;

    let sessions = SessionGrouper::new(&fs, &sink).discover(&export_dir);
    let factory = CommandParserFactory::from_config(&config.converter);

    let progress = if args.json || args.no_progress || sessions.is_empty() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(sessions.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .context("Invalid progress template")?,
        );
        pb
    };

    let report = ExportDriver::new(&fs, &sink)
        .with_options(ExportOptions::default())
        .on_yield(|session| {
            progress.inc(1);
            progress.set_message(session.prefix());
        })
        .export_all(&sessions, &factory);
    progress.finish_and_clear();

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&export_dir, &report);
    }

    if report.result.has_failures() {
        Ok(EXIT_PARTIAL_FAILURE)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn print_summary(export_dir: &Path, report: &BatchReport) {
    use colored::Colorize;

    if report.sessions.is_empty() {
        eprintln!(
            "{} Nothing to convert in {}",
            "⚠".yellow(),
            export_dir.display()
        );
        return;
    }

    for line in failure_lines(report) {
        eprintln!("{} {}", "✗".red(), line);
    }

    println!(
        "{} {} sessions from {}",
        "✓".green(),
        report.session_count().to_string().cyan(),
        export_dir.display()
    );
    println!(
        "  {} succeeded, {} failed, {} skipped (already exist)",
        report.result.succeeded.to_string().green(),
        report.result.failed.to_string().red(),
        report.skipped.to_string().dimmed()
    );
}

/// One line per parse failure or failed format
fn failure_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &report.sessions {
        match outcome {
            SessionOutcome::ParseFailed { session } => {
                lines.push(format!("{}: failed to parse", session));
            }
            SessionOutcome::Exported { session, formats } => {
                for (format, outcome) in formats {
                    if *outcome == FormatOutcome::Failed {
                        lines.push(format!(
                            "{}: failed to write {}",
                            session.output_path(*format).display(),
                            format
                        ));
                    }
                }
            }
        }
    }
    lines
}
