//! In-memory handler with per-path failure injection.

use super::{FileHandler, WalkEntry};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A [`FileHandler`] over an in-memory tree.
///
/// Directories are implied by file paths (and can be added explicitly).
/// Reads, writes and walk entries can be made to fail per path. Every
/// successful write is recorded and visible to later reads.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: BTreeSet<PathBuf>,
    read_errors: HashSet<PathBuf>,
    write_errors: HashSet<PathBuf>,
    walk_errors: BTreeSet<PathBuf>,
    abort_walk: bool,
    writes: Mutex<Vec<PathBuf>>,
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        lock(&self.files).insert(path.into(), content.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }

    /// Make `read_file(path)` fail.
    pub fn fail_read(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_errors.insert(path.into());
        self
    }

    /// Make `write_file(path)` fail.
    pub fn fail_write(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_errors.insert(path.into());
        self
    }

    /// Report `path` to the walker with an error attached.
    pub fn fail_walk(mut self, path: impl Into<PathBuf>) -> Self {
        self.walk_errors.insert(path.into());
        self
    }

    /// Make `walk` itself fail after every entry was visited.
    pub fn abort_walk(mut self) -> Self {
        self.abort_walk = true;
        self
    }

    /// Current content of `path` as UTF-8.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files)
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<PathBuf> {
        lock(&self.writes).clone()
    }

    fn entries_under(&self, root: &Path) -> BTreeMap<PathBuf, bool> {
        let mut entries: BTreeMap<PathBuf, bool> = BTreeMap::new();
        for file in lock(&self.files).keys() {
            if file != root && file.starts_with(root) {
                entries.insert(file.clone(), false);
                for ancestor in file.ancestors().skip(1) {
                    if ancestor == root || !ancestor.starts_with(root) {
                        break;
                    }
                    entries.insert(ancestor.to_path_buf(), true);
                }
            }
        }
        for dir in &self.dirs {
            if dir != root && dir.starts_with(root) {
                entries.insert(dir.clone(), true);
            }
        }
        entries
    }
}

impl FileHandler for MemoryHandler {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        if self.read_errors.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "injected read error"));
        }
        lock(&self.files)
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(WalkEntry<'_>) -> ControlFlow<()>,
    ) -> io::Result<()> {
        let injected = io::Error::new(io::ErrorKind::PermissionDenied, "injected walk error");
        let root_is_file = lock(&self.files).contains_key(root);
        let mut entries = vec![(root.to_path_buf(), !root_is_file)];
        entries.extend(self.entries_under(root));
        for path in &self.walk_errors {
            if path.starts_with(root) && !entries.iter().any(|(p, _)| p == path) {
                entries.push((path.clone(), false));
            }
        }
        for (path, is_dir) in &entries {
            let error = self.walk_errors.contains(path).then_some(&injected);
            let entry = WalkEntry {
                path,
                is_dir: *is_dir && error.is_none(),
                error,
            };
            if visit(entry).is_break() {
                break;
            }
        }
        if self.abort_walk {
            return Err(io::Error::other("injected walk abort"));
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        if self.write_errors.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "injected write error"));
        }
        lock(&self.files).insert(path.to_path_buf(), content.to_vec());
        lock(&self.writes).push(path.to_path_buf());
        Ok(())
    }
}
