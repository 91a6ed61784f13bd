//! Local filesystem export directory

use bipolar_core::fs::ExportDirectory;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Export directory backed by the local filesystem
///
/// Listings are sorted by name, ignoring case, so discovery order does not
/// depend on the platform's directory iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalExportDir;

impl LocalExportDir {
    /// Create a new local export directory accessor
    pub fn new() -> Self {
        Self
    }
}

impl ExportDirectory for LocalExportDir {
    fn entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 entry {:?}", name),
            }
        }

        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        debug!("Listed {} entries in {:?}", names.len(), dir);
        Ok(names)
    }

    /// Any entry at `path` counts, including a dangling symlink
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }
}
