//! bipolar-storage - Filesystem access library for bipolar
//!
//! This crate provides the local filesystem implementation of the export
//! directory collaborator.

mod export_dir;

pub use export_dir::LocalExportDir;
