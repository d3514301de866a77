//! Per-file classification.
//!
//! Checks run in a fixed order:
//! 1. the trimmed canonical text appears verbatim: `LicenseOk`;
//! 2. the header mentions a license: replace it or skip;
//! 3. no header: insert one or skip.
//!
//! The exact-match check comes first so a correct header is never treated as
//! "different" by the keyword heuristic. At most one write per file.

use crate::header::HeaderMatcher;
use crate::io::FileHandler;
use crate::models::{Action, Options};
use crate::transform;
use std::path::Path;

/// Classifies files against one canonical license text.
pub struct FileProcessor<'a> {
    license: &'a str,
    options: &'a Options,
    matcher: HeaderMatcher,
    handler: &'a dyn FileHandler,
}

impl<'a> FileProcessor<'a> {
    pub fn new(license: &'a str, options: &'a Options, handler: &'a dyn FileHandler) -> Self {
        Self {
            license,
            options,
            matcher: HeaderMatcher::from_option(options.header_regex.as_ref()),
            handler,
        }
    }

    /// Decide the Action for `content` and persist a rewrite when requested.
    pub fn classify(&self, path: &Path, content: &str) -> Action {
        if content.contains(self.license.trim()) {
            return Action::LicenseOk;
        }

        if self.matcher.contains_license_header(content) {
            if !self.options.replace {
                return Action::SkippedReplace;
            }
            let updated = transform::replace(&self.matcher, content, self.license);
            return self.persist(path, &updated, Action::LicenseReplaced);
        }

        if !self.options.add {
            return Action::SkippedAdd;
        }
        let updated = transform::insert(content, self.license);
        self.persist(path, &updated, Action::LicenseAdded)
    }

    fn persist(&self, path: &Path, content: &str, done: Action) -> Action {
        match self.handler.write_file(path, content.as_bytes()) {
            Ok(()) => done,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to write file");
                Action::OperationError
            }
        }
    }
}

/// Classify a single already-read file, writing it back if needed.
pub fn file(
    path: &Path,
    content: &str,
    license: &str,
    options: &Options,
    handler: &dyn FileHandler,
) -> Action {
    FileProcessor::new(license, options, handler).classify(path, content)
}
