//! Session grouping over a directory listing

use super::classifier::classify_detailed;
use crate::events::{ConvertEvent, EventSink};
use crate::fs::ExportDirectory;
use crate::types::SessionKey;
use std::collections::HashSet;
use std::path::Path;

/// Collapses a directory listing into distinct session keys
///
/// Keys come out in the order their first file was seen.
pub struct SessionGrouper<'a> {
    fs: &'a dyn ExportDirectory,
    sink: &'a dyn EventSink,
}

impl<'a> SessionGrouper<'a> {
    /// Create a grouper reading through `fs` and reporting to `sink`
    pub fn new(fs: &'a dyn ExportDirectory, sink: &'a dyn EventSink) -> Self {
        Self { fs, sink }
    }

    /// List `dir` and group its entries
    ///
    /// A missing or unreadable directory is reported and treated as empty.
    pub fn discover(&self, dir: &Path) -> Vec<SessionKey> {
        let entries = match self.fs.entries(dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.sink.emit(ConvertEvent::DirectoryMissing {
                    path: dir.to_path_buf(),
                    error: err.to_string(),
                });
                Vec::new()
            }
        };
        self.group(dir, &entries)
    }

    /// Group already-listed entry names from `dir`
    pub fn group<S: AsRef<str>>(&self, dir: &Path, entries: &[S]) -> Vec<SessionKey> {
        let mut seen = HashSet::new();
        let mut sessions = Vec::new();

        for name in entries {
            let name = name.as_ref();
            match classify_detailed(dir, name) {
                Ok(key) => {
                    if seen.insert(key.clone()) {
                        sessions.push(key);
                    }
                }
                Err(reason) => {
                    self.sink.emit(ConvertEvent::Ignored {
                        name: name.to_string(),
                        reason,
                    });
                }
            }
        }

        if sessions.is_empty() {
            self.sink.emit(ConvertEvent::NothingToConvert);
        }
        sessions
    }
}
