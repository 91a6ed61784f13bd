//! Doctor command
//!
//! Diagnose the export directory and converter setup.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use bipolar_integration::verification::{run_all_checks, VerificationResult};
use bipolar_integration::{resolve_export_dir, ConverterCommand};
use bipolar_storage::LocalExportDir;

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Export directory to check (default: from config, then FlowSync)
    #[arg(long, short)]
    pub dir: Option<PathBuf>,
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, config_path: &Path) -> Result<i32> {
    use colored::Colorize;

    println!("\n{}", "1. Configuration".bold().underline());
    let config = match super::load_config(config_path) {
        Ok(config) => {
            let source = if config_path.exists() {
                config_path.display().to_string()
            } else {
                "defaults (no config file)".to_string()
            };
            print_result(&VerificationResult::pass("Config", &source));
            config
        }
        Err(e) => {
            print_result(&VerificationResult::fail(
                "Config",
                &format!("{:#}", e),
                Some("Run 'bipolar config validate' for details"),
            ));
            return Ok(EXIT_ERROR);
        }
    };

    println!("\n{}", "2. Conversion".bold().underline());
    let export_dir = resolve_export_dir(&config, args.dir.as_deref())?;
    let command = ConverterCommand::from_config(&config.converter);
    let results = run_all_checks(&LocalExportDir::new(), &export_dir, &command);
    for result in &results {
        print_result(result);
    }

    let errors = results.iter().filter(|r| !r.passed).count();
    let warnings = results.iter().filter(|r| r.is_warning()).count();

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.to_string().yellow(),
        errors.to_string().red()
    );

    if errors == 0 && warnings == 0 {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(if errors == 0 { EXIT_SUCCESS } else { EXIT_ERROR })
}

fn print_result(result: &VerificationResult) {
    use colored::Colorize;

    let status = if !result.passed {
        "✗".red()
    } else if result.is_warning() {
        "⚠".yellow()
    } else {
        "✓".green()
    };
    println!("   {} {}: {}", status, result.name, result.message);
    if let Some(suggestion) = &result.suggestion {
        println!("     {}", suggestion.dimmed());
    }
}
