//! External converter module
//!
//! Provides a session parser that delegates decoding and writing to an
//! external program.

mod command;

pub use command::{CommandParser, CommandParserFactory};

use anyhow::{Context, Result};
use bipolar_core::config::ConverterConfig;
use std::ffi::OsStr;
use std::process::{Command, Output};

/// Converter program and its leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    /// Program to run
    pub program: String,
    /// Arguments placed before the subcommand
    pub args: Vec<String>,
}

impl ConverterCommand {
    /// Create a converter command for `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from configuration
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    /// Add leading arguments
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the converter with extra arguments, capturing its output
    pub fn run<I, S>(&self, extra: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .output()
            .with_context(|| format!("Failed to run converter '{}'", self.program))
    }

    /// Run the converter, reporting success as a bool
    ///
    /// Spawn errors and non-zero exits are logged.
    pub fn run_ok<I, S>(&self, extra: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = match self.run(extra) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("{:#}", e);
                return false;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!("{}: {}", self.program, stdout.trim());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("{} (stderr): {}", self.program, stderr.trim());
        }

        if !output.status.success() {
            tracing::warn!("Converter '{}' exited with {}", self.program, output.status);
            return false;
        }
        true
    }
}
