//! Concurrent tree walk and per-file dispatch.
//!
//! The walk itself runs on the calling thread. For each entry it decides,
//! without looking at content, whether to skip it (directory, ignored path,
//! foreign extension). Eligible files are read synchronously and handed to a
//! bounded `rayon` pool as one task each; every task sends exactly one
//! [`Operation`] over a bounded `crossbeam` channel to a single aggregator
//! thread. Read failures and traversal errors become `OperationError`
//! Operations without spawning work.
//!
//! ```text
//! walk (caller) ──read──▶ pool task ─┐
//!        │                           ├──▶ channel ──▶ StatsAggregator
//!        └── error Operation ────────┘
//! ```
//!
//! The walker counts what it dispatched and checks the aggregator received
//! exactly that many results.

use crate::error::{Error, Result};
use crate::filter;
use crate::io::{FileHandler, WalkEntry};
use crate::models::{Action, Operation, Options};
use crate::process::FileProcessor;
use crate::stats::{Stats, StatsAggregator};
use crossbeam::channel::{bounded, Sender};
use std::ops::ControlFlow;
use std::path::Path;
use std::thread;
use std::time::Instant;

/// Result channel capacity per worker.
const CHANNEL_BUFFER_MULTIPLIER: usize = 4;

/// Worker threads to use given a hard cap (0 = none) and a CPU share.
///
/// Never returns less than one.
pub fn optimal_workers(max_threads: usize, thread_percentage: u8) -> usize {
    let cpu_cores = num_cpus::get();
    let percentage = thread_percentage.clamp(1, 100) as usize;
    let by_percentage = std::cmp::max(1, cpu_cores * percentage / 100);
    if max_threads > 0 {
        std::cmp::min(max_threads, by_percentage)
    } else {
        by_percentage
    }
}

/// Scan `options.path` and classify every eligible file.
///
/// Fails only when the license file cannot be loaded or the pool cannot
/// start. Per-file problems land in the `OperationError` bucket; a walk that
/// aborts records one for the root and keeps what was already processed.
pub fn files(options: &Options, handler: &dyn FileHandler) -> Result<Stats> {
    let started = Instant::now();
    let license = load_license(options, handler)?;
    if license.trim().is_empty() {
        tracing::warn!(
            path = %options.license_path.display(),
            "license text is empty; every file will be reported as ok"
        );
    }

    let workers = optimal_workers(options.max_threads, options.thread_percentage);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lhc-worker-{i}"))
        .build()?;
    tracing::info!(
        root = %options.path.display(),
        extensions = ?options.extensions,
        ignore = ?options.ignore_paths,
        workers,
        "scanning"
    );

    let processor = FileProcessor::new(&license, options, handler);
    let (tx, rx) = bounded::<Operation>(workers * CHANNEL_BUFFER_MULTIPLIER);

    let (dispatched, stats) = thread::scope(|ts| {
        let aggregator = ts.spawn(move || StatsAggregator::new(started).drain(rx));
        let dispatched = pool.in_place_scope(|scope| {
            let mut dispatcher = Dispatcher {
                options,
                handler,
                processor: &processor,
                tx,
                dispatched: 0,
            };
            let walked = handler.walk(&options.path, &mut |entry| {
                dispatcher.visit(scope, entry);
                ControlFlow::Continue(())
            });
            if let Err(err) = walked {
                tracing::warn!(root = %options.path.display(), error = %err, "walk aborted");
                dispatcher.emit(Operation::new(Action::OperationError, &options.path));
            }
            dispatcher.dispatched
        });
        let stats = match aggregator.join() {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        (dispatched, stats)
    });

    if stats.total() != dispatched {
        return Err(Error::Incomplete {
            expected: dispatched,
            received: stats.total(),
        });
    }

    tracing::info!(
        files = stats.total(),
        ok = stats.count(Action::LicenseOk),
        added = stats.count(Action::LicenseAdded),
        replaced = stats.count(Action::LicenseReplaced),
        errors = stats.count(Action::OperationError),
        elapsed_ms = stats.elapsed_ms as u64,
        "scan finished"
    );
    Ok(stats)
}

fn load_license(options: &Options, handler: &dyn FileHandler) -> Result<String> {
    let path = &options.license_path;
    let bytes = handler.read_file(path).map_err(|source| Error::LicenseRead {
        path: path.clone(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| Error::LicenseEncoding { path: path.clone() })
}

/// Per-walk state living on the traversal thread.
struct Dispatcher<'a> {
    options: &'a Options,
    handler: &'a dyn FileHandler,
    processor: &'a FileProcessor<'a>,
    tx: Sender<Operation>,
    dispatched: usize,
}

impl<'a> Dispatcher<'a> {
    fn visit<'s>(&mut self, scope: &rayon::Scope<'s>, entry: WalkEntry<'_>)
    where
        'a: 's,
    {
        let path = entry.path;
        if entry.is_dir {
            return;
        }
        let relative = relative_to_root(path, &self.options.path);
        let ignore = &self.options.ignore_paths;
        if filter::should_ignore(&relative, ignore) || filter::should_ignore(path, ignore) {
            tracing::debug!(path = %path.display(), "ignored");
            return;
        }
        if let Some(err) = entry.error {
            tracing::warn!(path = %path.display(), error = %err, "failed to visit entry");
            self.emit(Operation::new(Action::OperationError, path));
            return;
        }
        if !filter::extension_eligible(path, &self.options.extensions) {
            return;
        }

        let content = match self.handler.read_file(path) {
            Ok(bytes) => String::from_utf8(bytes),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read file");
                self.emit(Operation::new(Action::OperationError, path));
                return;
            }
        };
        let content = match content {
            Ok(s) => s,
            Err(_) => {
                tracing::warn!(path = %path.display(), "file is not valid UTF-8");
                self.emit(Operation::new(Action::OperationError, path));
                return;
            }
        };

        let tx = self.tx.clone();
        let processor = self.processor;
        let path = path.to_path_buf();
        self.dispatched += 1;
        scope.spawn(move |_| {
            let action = processor.classify(&path, &content);
            tracing::debug!(path = %path.display(), %action, "classified");
            // The aggregator outlives every task in the scope.
            let _ = tx.send(Operation::new(action, path));
        });
    }

    fn emit(&mut self, op: Operation) {
        self.dispatched += 1;
        let _ = self.tx.send(op);
    }
}

/// Path relative to the scan root, so ignore entries never match the root's
/// own components. Falls back to the path itself for the root entry.
pub(crate) fn relative_to_root(path: &Path, root: &Path) -> std::path::PathBuf {
    match pathdiff::diff_paths(path, root) {
        Some(rel) if !rel.as_os_str().is_empty() && !rel.starts_with("..") => rel,
        _ => path.to_path_buf(),
    }
}
