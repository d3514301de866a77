//! Run options shared read-only by every worker.

use regex::Regex;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
/// Immutable configuration for one run.
///
/// Built once (usually by `config::resolve_effective`) and never mutated
/// while files are being processed.
pub struct Options {
    /// Insert the header into files that have none.
    pub add: bool,
    /// Replace a different license header with the canonical one.
    pub replace: bool,
    /// Root of the tree to scan.
    pub path: PathBuf,
    /// File holding the canonical header text.
    pub license_path: PathBuf,
    /// Dot-prefixed suffixes, e.g. `.rs`. Matched case-sensitively.
    pub extensions: Vec<String>,
    /// Folder names, file names or relative path fragments to skip.
    pub ignore_paths: Vec<String>,
    /// Pattern locating the header comment. `None` uses the default
    /// `/* ... */` matcher.
    pub header_regex: Option<Regex>,
    /// Upper bound for worker threads (0 = derive from CPU count).
    pub max_threads: usize,
    /// Share of CPU cores used when deriving the worker count (1-100).
    pub thread_percentage: u8,
}

impl Options {
    pub fn new(path: impl Into<PathBuf>, license_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            license_path: license_path.into(),
            thread_percentage: 75,
            ..Self::default()
        }
    }
}
