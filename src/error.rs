//! Run-level errors.
//!
//! Only conditions that abort a whole run live here. Problems with a single
//! file are reported as `Action::OperationError` and never surface as `Error`.

use std::path::PathBuf;

/// Errors returned by [`crate::files`] and configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The canonical license file could not be read.
    #[error("failed to read license file {path}: {source}")]
    LicenseRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The canonical license file is not valid UTF-8.
    #[error("license file {path} is not valid UTF-8")]
    LicenseEncoding { path: PathBuf },
    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    /// Fewer or more results were collected than files dispatched.
    #[error("collected {received} results but dispatched {expected} files")]
    Incomplete { expected: usize, received: usize },
    /// A user supplied header pattern does not compile.
    #[error("invalid header regex: {0}")]
    InvalidHeaderRegex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
