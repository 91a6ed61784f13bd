//! Environment verification
//!
//! Checks run by `bipolar doctor`.

use crate::converter::ConverterCommand;
use bipolar_core::events::RecordingSink;
use bipolar_core::fs::ExportDirectory;
use bipolar_core::session::SessionGrouper;
use std::path::Path;

/// Verification check result
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Check name
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Message describing the result
    pub message: String,
    /// Optional suggestion for fixing
    pub suggestion: Option<String>,
}

impl VerificationResult {
    /// Create a passing result
    pub fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    /// Create a failing result
    pub fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Create a warning result (passed but with suggestion)
    pub fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Whether this is a warning
    pub fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Verify the export directory exists and count its sessions
pub fn verify_export_dir(fs: &dyn ExportDirectory, dir: &Path) -> VerificationResult {
    let name = "Export directory";

    if fs.entries(dir).is_err() {
        return VerificationResult::fail(
            name,
            &format!("{} not found", dir.display()),
            Some("Run FlowSync once, set export.dir in the config, or pass --dir"),
        );
    }

    let sink = RecordingSink::new();
    let sessions = SessionGrouper::new(fs, &sink).discover(dir);
    if sessions.is_empty() {
        return VerificationResult::warn(
            name,
            &format!("{} contains no training sessions", dir.display()),
            Some("Sync your device with FlowSync to populate the export directory"),
        );
    }

    VerificationResult::pass(
        name,
        &format!("{} ({} sessions)", dir.display(), sessions.len()),
    )
}

/// Verify the converter program can be started
pub fn verify_converter(command: &ConverterCommand) -> VerificationResult {
    match command.run(["--version"]) {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let version = version.lines().next().unwrap_or("").trim();
            let message = if version.is_empty() {
                command.program.clone()
            } else {
                format!("{} ({})", command.program, version)
            };
            VerificationResult::pass("Converter", &message)
        }
        Ok(output) => VerificationResult::warn(
            "Converter",
            &format!("{} --version exited with {}", command.program, output.status),
            Some("Check that converter.program points at a bipolar-compatible converter"),
        ),
        Err(_) => VerificationResult::fail(
            "Converter",
            &format!("{} not found", command.program),
            Some("Install the converter or set converter.program in the config"),
        ),
    }
}

/// Run all verification checks
pub fn run_all_checks(
    fs: &dyn ExportDirectory,
    export_dir: &Path,
    command: &ConverterCommand,
) -> Vec<VerificationResult> {
    vec![verify_export_dir(fs, export_dir), verify_converter(command)]
}
