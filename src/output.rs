//! Report rendering.
//!
//! Supports `human` (default) and `json` outputs. Paths are shown relative to
//! the scan root. Warnings about skipped files and errors go to stderr in
//! human mode so they never mix with the report.

use crate::config::Effective;
use crate::models::{Action, Options};
use crate::stats::Stats;
use crate::walker::relative_to_root;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fmt::Write as _;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn paint(s: &str, action: Action, color: bool) -> String {
    if !color {
        return s.to_string();
    }
    match action {
        Action::LicenseOk => s.green().to_string(),
        Action::LicenseReplaced => s.cyan().to_string(),
        Action::LicenseAdded => s.blue().to_string(),
        Action::SkippedAdd | Action::SkippedReplace => s.yellow().to_string(),
        Action::OperationError => s.red().to_string(),
    }
}

/// `error:` prefix for fatal messages on stderr.
pub fn error_prefix() -> String {
    if use_colors("human") {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// `note:` prefix for non-fatal messages on stderr.
pub fn note_prefix() -> String {
    if use_colors("human") {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

fn warn_prefix(color: bool) -> String {
    if color {
        "[!]".yellow().bold().to_string()
    } else {
        "[!]".to_string()
    }
}

/// Print the run report in the requested format.
pub fn print_stats(stats: &Stats, eff: &Effective) {
    match eff.output.as_str() {
        "json" => {
            let out = compose_stats_json(stats, &eff.options.path);
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("{} {}", error_prefix(), e),
            }
        }
        _ => {
            let color = use_colors(&eff.output);
            print!("{}", render_human(stats, &eff.options, eff.verbose, color));
            for w in compose_warnings(stats) {
                eprintln!("{} {}", warn_prefix(color), w);
            }
        }
    }
}

/// Render the human report (pure) for testing.
pub fn render_human(stats: &Stats, opts: &Options, verbose: bool, color: bool) -> String {
    let mut out = String::new();
    if !verbose {
        let _ = writeln!(
            out,
            "{} licenses ok, {} licenses replaced, {} licenses added",
            paint(&stats.count(Action::LicenseOk).to_string(), Action::LicenseOk, color),
            paint(
                &stats.count(Action::LicenseReplaced).to_string(),
                Action::LicenseReplaced,
                color
            ),
            paint(&stats.count(Action::LicenseAdded).to_string(), Action::LicenseAdded, color),
        );
        return out;
    }

    out.push_str("files:\n");
    for action in Action::ALL {
        let files = stats.files(action);
        if files.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {}:", paint(action.as_str(), action, color));
        let mut shown: Vec<String> = files
            .iter()
            .map(|p| display_path(p, &opts.path))
            .collect();
        shown.sort();
        for p in shown {
            let _ = writeln!(out, "    - {}", p);
        }
    }

    out.push_str("options:\n");
    let _ = writeln!(out, "  add: {}", opts.add);
    let _ = writeln!(out, "  replace: {}", opts.replace);
    let _ = writeln!(out, "  path: {}", opts.path.display());
    let _ = writeln!(out, "  license: {}", opts.license_path.display());
    let _ = writeln!(out, "  extensions: [{}]", opts.extensions.join(", "));
    let _ = writeln!(out, "  ignore: [{}]", opts.ignore_paths.join(", "));
    if let Some(re) = &opts.header_regex {
        let _ = writeln!(out, "  header_regex: {}", re.as_str());
    }

    out.push_str("totals:\n");
    for action in Action::ALL {
        let _ = writeln!(
            out,
            "  {}: {}",
            action.as_str(),
            paint(&stats.count(action).to_string(), action, color)
        );
    }
    let _ = writeln!(out, "  total: {}", stats.total());
    let _ = writeln!(out, "  elapsed_time: {}ms", stats.elapsed_ms);
    out
}

/// Warning lines for skipped files and errors (pure).
pub fn compose_warnings(stats: &Stats) -> Vec<String> {
    let mut out = Vec::new();
    let skipped_add = stats.count(Action::SkippedAdd);
    if skipped_add > 0 {
        out.push(format!(
            "{} file(s) have no license header and were left untouched; pass -a to add it",
            skipped_add
        ));
    }
    let skipped_replace = stats.count(Action::SkippedReplace);
    if skipped_replace > 0 {
        out.push(format!(
            "{} file(s) have a different license header and were left untouched; pass -r to replace it",
            skipped_replace
        ));
    }
    let errors = stats.count(Action::OperationError);
    if errors > 0 {
        out.push(format!(
            "{} file(s) could not be processed; run with -v to list them",
            errors
        ));
    }
    out
}

/// Compose the JSON report (pure) for testing/snapshot purposes.
pub fn compose_stats_json(stats: &Stats, root: &Path) -> JsonVal {
    let mut files = serde_json::Map::new();
    let mut summary = serde_json::Map::new();
    for action in Action::ALL {
        let mut paths: Vec<String> = stats
            .files(action)
            .iter()
            .map(|p| display_path(p, root))
            .collect();
        paths.sort();
        files.insert(action.as_str().to_string(), json!(paths));
        summary.insert(action.as_str().to_string(), json!(stats.count(action)));
    }
    summary.insert("total".into(), json!(stats.total()));
    summary.insert("elapsed_ms".into(), json!(stats.elapsed_ms as u64));
    json!({"files": files, "summary": summary})
}

fn display_path(path: &Path, root: &Path) -> String {
    relative_to_root(path, root).to_string_lossy().to_string()
}
