//! Filesystem collaborator trait and abstractions

use std::io;
use std::path::Path;

/// Read-side view of the export directory
///
/// Listing and existence checks are all the orchestrator needs from the
/// filesystem; writes happen inside the session parser.
pub trait ExportDirectory {
    /// List entry names in `dir`, in a stable order
    fn entries(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Check if a file is already present at `path`
    fn exists(&self, path: &Path) -> bool;
}

impl<T: ExportDirectory + ?Sized> ExportDirectory for &T {
    fn entries(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).entries(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// In-memory directory tree for testing
#[cfg(any(test, feature = "testing"))]
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

    type Tree = BTreeMap<PathBuf, Vec<String>>;

    /// In-memory export directory
    ///
    /// Entries keep insertion order per directory so tests control the
    /// listing order exactly.
    #[derive(Debug, Default)]
    pub struct MemoryDirectory {
        dirs: RwLock<Tree>,
    }

    impl MemoryDirectory {
        /// Create an empty tree
        pub fn new() -> Self {
            Self::default()
        }

        fn read(&self) -> RwLockReadGuard<'_, Tree> {
            self.dirs.read().unwrap_or_else(PoisonError::into_inner)
        }

        fn write(&self) -> RwLockWriteGuard<'_, Tree> {
            self.dirs.write().unwrap_or_else(PoisonError::into_inner)
        }

        /// Create a tree with one directory holding `names`
        pub fn with_entries(dir: impl Into<PathBuf>, names: &[&str]) -> Self {
            let tree = Self::new();
            let dir = dir.into();
            tree.write().insert(dir.clone(), Vec::new());
            for name in names {
                tree.add(dir.join(name));
            }
            tree
        }

        /// Add a file, creating its directory if needed
        pub fn add(&self, path: impl AsRef<Path>) {
            let path = path.as_ref();
            let dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut dirs = self.write();
            let entries = dirs.entry(dir).or_default();
            if !entries.contains(&name) {
                entries.push(name);
            }
        }
    }

    impl ExportDirectory for MemoryDirectory {
        fn entries(&self, dir: &Path) -> io::Result<Vec<String>> {
            self.read()
                .get(dir)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "directory not found"))
        }

        fn exists(&self, path: &Path) -> bool {
            let Some(name) = path.file_name() else {
                return false;
            };
            let dir = path.parent().unwrap_or_else(|| Path::new(""));
            self.read()
                .get(dir)
                .map(|entries| entries.iter().any(|e| e.as_str() == name))
                .unwrap_or(false)
        }
    }

}
