//! License header checker core library.
//!
//! This crate scans a source tree, decides whether each file starts with the
//! canonical license header, and leaves it alone, inserts the header, or
//! replaces a mismatched one. Results are aggregated into [`Stats`].
//!
//! High-level modules:
//! - `models`: Action, Operation and run Options.
//! - `filter`: Extension and ignore-path predicates.
//! - `header`: Leading block comment extraction and license detection.
//! - `transform`: Header insertion and replacement text surgery.
//! - `process`: Per-file classification (`file`).
//! - `walker`: Concurrent tree walk and dispatch (`files`).
//! - `stats`: Single-consumer result aggregation.
//! - `io`: File system capability trait plus real and in-memory handlers.
//! - `error`: Run-level error type.
//! - `cli`, `config`, `output`, `logging`: Binary support.
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod header;
pub mod io;
pub mod logging;
pub mod models;
pub mod output;
pub mod process;
pub mod stats;
pub mod transform;
pub mod walker;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
pub use models::{Action, Operation, Options};
pub use process::file;
pub use stats::Stats;
pub use walker::files;
