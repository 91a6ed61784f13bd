//! Filename classification
//!
//! Decides whether a directory entry is part of a training session export
//! and, if so, which session it belongs to.

use crate::types::{ExportFormat, SessionKey};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Prefix shared by every v2 user export from FlowSync
pub const EXPORT_PREFIX: &str = "v2-users-";

/// Number of `-` delimited components that identify a session
pub const KEY_COMPONENTS: usize = 6;

/// Why an entry was not accepted as a session file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Not a v2 user export at all
    NotSessionExport,
    /// One of our own `.gpx`/`.hrm`/`.tcx` outputs
    OutputArtifact,
    /// Export file that is not a training session
    NamingConvention,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::NotSessionExport => "not a v2 user export",
            Rejection::OutputArtifact => "previous output",
            Rejection::NamingConvention => "not a training session",
        };
        write!(f, "{}", reason)
    }
}

/// Classify one entry, returning the session key it belongs to
pub fn classify(dir: &Path, name: &str) -> Option<SessionKey> {
    classify_detailed(dir, name).ok()
}

/// Classify one entry, reporting the first rule that rejected it
pub fn classify_detailed(dir: &Path, name: &str) -> Result<SessionKey, Rejection> {
    if !name.starts_with(EXPORT_PREFIX) {
        return Err(Rejection::NotSessionExport);
    }

    if ExportFormat::ALL.iter().any(|f| f.matches_name(name)) {
        return Err(Rejection::OutputArtifact);
    }

    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() < KEY_COMPONENTS || parts[3] != "training" || parts[4] != "sessions" {
        return Err(Rejection::NamingConvention);
    }

    Ok(SessionKey::new(dir, &parts[..KEY_COMPONENTS].join("-")))
}
