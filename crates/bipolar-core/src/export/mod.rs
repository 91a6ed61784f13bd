//! Batch export of discovered sessions
//!
//! For each session the driver creates a parser, parses once, then tries
//! GPX, HRM and TCX in turn. Existing outputs are never replaced unless
//! [`ExportOptions::overwrite`] is set.
//!
//! # Example
//!
//! ```ignore
//! use bipolar_core::export::ExportDriver;
//!
//! let report = ExportDriver::new(&fs, &sink)
//!     .on_yield(|_| progress.inc(1))
//!     .export_all(&sessions, &factory);
//! println!("{} succeeded, {} failed", report.result.succeeded, report.result.failed);
//! ```

mod driver;
mod parser;
mod report;

pub use driver::{ExportDriver, ExportOptions, YieldHook};
pub use parser::{ParserFactory, SessionParser};
pub use report::{BatchReport, BatchReporter, BatchResult, FormatOutcome, SessionOutcome};
