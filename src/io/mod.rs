//! File system capability used by the pipeline.
//!
//! The core never touches the disk directly. It reads, walks and writes
//! through a [`FileHandler`], which lets tests run against
//! [`MemoryHandler`] and inject failures per path.

mod fs;
mod memory;

pub use fs::FsHandler;
pub use memory::MemoryHandler;

use std::ops::ControlFlow;
use std::path::Path;

/// One entry reported by [`FileHandler::walk`].
#[derive(Debug)]
pub struct WalkEntry<'a> {
    pub path: &'a Path,
    pub is_dir: bool,
    /// Set when the entry could not be visited (e.g. unreadable directory).
    pub error: Option<&'a std::io::Error>,
}

/// Read/walk/write operations the pipeline depends on.
pub trait FileHandler: Send + Sync {
    /// Read the whole file.
    fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Visit every entry under `root`, `root` included. Returning
    /// `ControlFlow::Break` from `visit` stops the walk early.
    fn walk(
        &self,
        root: &Path,
        visit: &mut dyn FnMut(WalkEntry<'_>) -> ControlFlow<()>,
    ) -> std::io::Result<()>;

    /// Replace the file's full content.
    fn write_file(&self, path: &Path, content: &[u8]) -> std::io::Result<()>;
}
