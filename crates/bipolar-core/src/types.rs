//! Core type definitions for bipolar

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical base path of one training session
///
/// The export directory joined with the first six `-` delimited components
/// of a session file name, e.g. `/export/v2-users-1-training-sessions-42`.
/// Output files are named by appending a format extension to the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(PathBuf);

impl SessionKey {
    /// Build a key from a directory and a session prefix
    pub fn new(dir: impl AsRef<Path>, prefix: &str) -> Self {
        SessionKey(dir.as_ref().join(prefix))
    }

    /// The directory the session was found in
    pub fn dir(&self) -> &Path {
        self.0.parent().unwrap_or_else(|| Path::new(""))
    }

    /// The shared six-component file name prefix
    pub fn prefix(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The key as a path
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Output file for the given format: the key with `.gpx`/`.hrm`/`.tcx` appended
    pub fn output_path(&self, format: ExportFormat) -> PathBuf {
        let mut name = OsString::from(self.0.as_os_str());
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for SessionKey {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Output format produced for every parsed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// GPS exchange format (route)
    Gpx,
    /// Polar heart-rate monitor format
    Hrm,
    /// Training Center XML
    Tcx,
}

impl ExportFormat {
    /// All formats, in export order
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Gpx, ExportFormat::Hrm, ExportFormat::Tcx];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Gpx => "gpx",
            ExportFormat::Hrm => "hrm",
            ExportFormat::Tcx => "tcx",
        }
    }

    /// Upper-case label used in log messages
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Gpx => "GPX",
            ExportFormat::Hrm => "HRM",
            ExportFormat::Tcx => "TCX",
        }
    }

    /// Whether a file name carries this format's extension
    pub fn matches_name(&self, name: &str) -> bool {
        name.strip_suffix(self.extension())
            .map(|stem| stem.ends_with('.'))
            .unwrap_or(false)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
