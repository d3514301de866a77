//! Shared data models: per-file outcomes and run options.

pub mod options;

pub use options::Options;

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Outcome of classifying one file.
pub enum Action {
    /// No header found and `add` was not requested.
    SkippedAdd,
    /// A different header was found and `replace` was not requested.
    SkippedReplace,
    /// The canonical header is already present.
    LicenseOk,
    /// The canonical header was inserted.
    LicenseAdded,
    /// A different header was replaced by the canonical one.
    LicenseReplaced,
    /// The file could not be read, walked, or written.
    OperationError,
}

impl Action {
    /// All actions in reporting order.
    pub const ALL: [Action; 6] = [
        Action::LicenseOk,
        Action::LicenseReplaced,
        Action::LicenseAdded,
        Action::SkippedAdd,
        Action::SkippedReplace,
        Action::OperationError,
    ];

    /// Stable bucket name used by printers.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::SkippedAdd => "skipped_add",
            Action::SkippedReplace => "skipped_replace",
            Action::LicenseOk => "license_ok",
            Action::LicenseAdded => "license_added",
            Action::LicenseReplaced => "license_replaced",
            Action::OperationError => "errors",
        }
    }

    /// True when the file content was rewritten.
    pub fn wrote(self) -> bool {
        matches!(self, Action::LicenseAdded | Action::LicenseReplaced)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One file's result, sent from a worker to the aggregator.
pub struct Operation {
    pub action: Action,
    pub path: PathBuf,
}

impl Operation {
    pub fn new(action: Action, path: impl Into<PathBuf>) -> Self {
        Self {
            action,
            path: path.into(),
        }
    }
}
