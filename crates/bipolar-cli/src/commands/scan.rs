//! Scan command
//!
//! List the sessions discovery would convert, without converting anything.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use bipolar_core::events::{ConvertEvent, RecordingSink, Tee, TracingSink};
use bipolar_core::fs::ExportDirectory;
use bipolar_core::session::SessionGrouper;
use bipolar_core::types::ExportFormat;
use bipolar_integration::resolve_export_dir;
use bipolar_storage::LocalExportDir;

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Export directory to scan (default: from config, then FlowSync)
    #[arg(long, short)]
    pub dir: Option<PathBuf>,

    /// Print session keys as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the scan command
pub fn execute(args: ScanArgs, config_path: &Path) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let export_dir = resolve_export_dir(&config, args.dir.as_deref())?;

    let fs = LocalExportDir::new();
    let recorder = RecordingSink::new();
    let sink = Tee(TracingSink, &recorder);
    let sessions = SessionGrouper::new(&fs, &sink).discover(&export_dir);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    let missing = recorder
        .events()
        .iter()
        .any(|e| matches!(e, ConvertEvent::DirectoryMissing { .. }));
    if missing {
        eprintln!(
            "{} Export directory not found: {}",
            "⚠".yellow(),
            export_dir.display()
        );
        return Ok(());
    }

    if sessions.is_empty() {
        eprintln!("Found nothing to convert in {}", export_dir.display());
        return Ok(());
    }

    println!(
        "{} sessions in {}",
        sessions.len().to_string().cyan(),
        export_dir.display()
    );
    for session in &sessions {
        let done = ExportFormat::ALL
            .iter()
            .filter(|f| fs.exists(&session.output_path(**f)))
            .count();
        let status = if done == ExportFormat::ALL.len() {
            "converted".green()
        } else if done == 0 {
            "pending".yellow()
        } else {
            "partial".yellow()
        };
        println!("  {} [{}]", session.prefix(), status);
    }

    Ok(())
}
