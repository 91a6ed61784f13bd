//! Export directory detection
//!
//! FlowSync writes its exports under the user's generic data location.

use anyhow::{bail, Result};
use bipolar_core::config::Config;
use std::path::{Path, PathBuf};

/// Path of the export directory relative to the generic data location
pub const FLOWSYNC_EXPORT_SUBDIR: &str = "Polar/PolarFlowSync/export";

/// Locate the FlowSync export directory for the current user
///
/// Returns the expected location whether or not it exists yet.
pub fn flowsync_export_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(FLOWSYNC_EXPORT_SUBDIR))
}

fn data_dir() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
}

/// Pick the directory to scan
///
/// An explicit override wins, then the configured directory, then the
/// FlowSync default.
pub fn resolve_export_dir(config: &Config, override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = &config.export.dir {
        return Ok(dir.clone());
    }
    match flowsync_export_dir() {
        Some(dir) => Ok(dir),
        None => bail!("Cannot determine the FlowSync export directory; set export.dir or pass --dir"),
    }
}
