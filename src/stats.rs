//! Result aggregation.
//!
//! A single [`StatsAggregator`] owns the [`Stats`] buckets and drains
//! Operations from the result channel. Producers never touch the buckets,
//! so no locking is involved.

use crate::models::{Action, Operation};
use crossbeam::channel::Receiver;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Aggregate result of a run: paths bucketed by Action plus elapsed time.
pub struct Stats {
    files: BTreeMap<Action, Vec<PathBuf>>,
    pub elapsed_ms: u128,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the operation's path to its Action bucket.
    pub fn add_operation(&mut self, op: Operation) {
        self.files.entry(op.action).or_default().push(op.path);
    }

    /// Paths classified as `action` (order is arrival order).
    pub fn files(&self, action: Action) -> &[PathBuf] {
        self.files.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, action: Action) -> usize {
        self.files(action).len()
    }

    /// Sum of all bucket sizes.
    pub fn total(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Action::OperationError) > 0
    }
}

/// Sole consumer of completed Operations.
pub struct StatsAggregator {
    started: Instant,
    stats: Stats,
}

impl StatsAggregator {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            stats: Stats::new(),
        }
    }

    /// Receive until every sender is gone, then stamp the elapsed time.
    pub fn drain(mut self, rx: Receiver<Operation>) -> Stats {
        for op in rx.iter() {
            tracing::debug!(path = %op.path.display(), action = %op.action, "collected");
            self.stats.add_operation(op);
        }
        self.stats.elapsed_ms = self.started.elapsed().as_millis();
        self.stats
    }
}
