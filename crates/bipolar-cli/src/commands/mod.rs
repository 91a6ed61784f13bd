//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod convert;
pub mod doctor;
pub mod scan;

use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use bipolar_core::config::Config;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// bipolar - Convert Polar FlowSync exports to GPX, HRM and TCX
#[derive(Debug, Parser)]
#[command(name = "bipolar")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BIPOLAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert every session in the export directory
    Convert(convert::ConvertArgs),

    /// List the sessions found in the export directory
    Scan(scan::ScanArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),

    /// Diagnose export directory and converter setup
    Doctor(doctor::DoctorArgs),
}

/// Run the CLI application, returning the process exit code
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    // Dispatch to command handler
    match cli.command {
        Commands::Convert(args) => convert::execute(args, &config_path),
        Commands::Scan(args) => scan::execute(args, &config_path).map(|_| EXIT_SUCCESS),
        Commands::Config(cmd) => config::execute(cmd, &config_path).map(|_| EXIT_SUCCESS),
        Commands::Doctor(args) => doctor::execute(args, &config_path),
    }
}

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "bipolar", "bipolar")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".bipolar/config.toml"))
}

/// Load configuration, using defaults when the file does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    Ok(Config::load(path)?)
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
