//! bipolar-core - Core library for bipolar
//!
//! This crate provides the session discovery and batch export logic that
//! turns a FlowSync export directory into GPX, HRM and TCX files, along with
//! the event vocabulary, configuration model and error type shared by the
//! other crates.

pub mod error;
pub mod types;
pub mod config;
pub mod events;
pub mod fs;
pub mod session;
pub mod export;

pub use error::{BipolarError, Result};
pub use types::*;
