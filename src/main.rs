//! `lhc` binary entry point.
//! Resolves configuration, runs the concurrent walk and prints the report.

use anyhow::Context;
use clap::Parser;
use license_header_checker::cli::Cli;
use license_header_checker::io::FsHandler;
use license_header_checker::{config, logging, output};

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", output::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

/// Exit code 1 when any file ended in the error bucket.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    let eff = config::resolve_effective(cli).context("invalid configuration")?;
    if let Err(e) = logging::init(eff.verbose) {
        eprintln!("{} {}", output::note_prefix(), e);
    }
    match &eff.config_file {
        Some(p) => tracing::debug!(config = %p.display(), "using config file"),
        None => tracing::debug!("no lhc.toml found; using CLI arguments and defaults"),
    }
    let stats = license_header_checker::files(&eff.options, &FsHandler)
        .with_context(|| format!("failed to check {}", eff.options.path.display()))?;
    output::print_stats(&stats, &eff);
    Ok(if stats.has_errors() { 1 } else { 0 })
}
