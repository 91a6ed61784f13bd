//! bipolar-integration - FlowSync and converter integration library for bipolar
//!
//! This crate connects the core orchestration to the outside world.
//!
//! ## Features
//!
//! - Locating the FlowSync export directory
//! - Session parser backed by an external converter program
//! - Environment verification for `bipolar doctor`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bipolar_integration::{flowsync_export_dir, CommandParserFactory};
//!
//! let factory = CommandParserFactory::from_config(&config.converter);
//! let report = driver.export_all(&sessions, &factory);
//! ```

pub mod converter;
pub mod detection;
pub mod verification;

pub use converter::{CommandParser, CommandParserFactory, ConverterCommand};
pub use detection::{flowsync_export_dir, resolve_export_dir};
pub use verification::VerificationResult;
