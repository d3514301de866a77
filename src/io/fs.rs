//! Real file system handler.

use super::{FileHandler, WalkEntry};
use std::fs;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Disk-backed [`FileHandler`].
///
/// Walks with `walkdir` without following symlinks. Writes go to a temporary
/// file next to the target which is then persisted over it, so a failed
/// write never leaves a truncated source file behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsHandler;

impl FileHandler for FsHandler {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(WalkEntry<'_>) -> ControlFlow<()>,
    ) -> io::Result<()> {
        for entry in WalkDir::new(root).follow_links(false) {
            let flow = match entry {
                Ok(e) => visit(WalkEntry {
                    path: e.path(),
                    is_dir: e.file_type().is_dir(),
                    error: None,
                }),
                Err(err) => {
                    let path: PathBuf = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.to_path_buf());
                    let io_err = io::Error::from(err);
                    visit(WalkEntry {
                        path: &path,
                        is_dir: false,
                        error: Some(&io_err),
                    })
                }
            };
            if flow.is_break() {
                break;
            }
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(path).ok().map(|m| m.permissions());
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        if let Some(perms) = permissions {
            tmp.as_file().set_permissions(perms)?;
        }
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
