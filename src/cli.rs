//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "lhc",
    version,
    about = "Check, add or replace license headers in source files",
    long_about = "lhc walks a source tree and makes sure every file with a matching extension starts with the given license header.\n\nConfiguration precedence: CLI > lhc.toml > defaults.",
    after_help = "Examples:\n  lhc -a -r -i node_modules,client/assets ./LICENSE.txt . ts js\n  lhc -v --output json ./header.txt src rs\n  lhc --config tools/lhc.toml"
)]
/// Flags and positionals; every value may also come from `lhc.toml`.
pub struct Cli {
    #[arg(short = 'a', long = "add", action = clap::ArgAction::SetTrue, help = "Add the license header to files that have none")]
    pub add: bool,
    #[arg(short = 'r', long = "replace", action = clap::ArgAction::SetTrue, help = "Replace existing license headers that differ")]
    pub replace: bool,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::SetTrue, help = "List every file per result bucket and enable debug logs")]
    pub verbose: bool,
    #[arg(short = 'i', long = "ignore", value_delimiter = ',', help = "Comma separated paths to skip (e.g. node_modules,client/assets)")]
    pub ignore: Vec<String>,
    #[arg(short = 'e', long = "header-regex", help = "Regex matching the existing header block (named group `header` optional)")]
    pub header_regex: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Upper bound on worker threads (default: 75% of CPUs)")]
    pub max_threads: Option<usize>,
    #[arg(long, help = "Path to lhc.toml|yaml (default: discovered from the scan path)")]
    pub config: Option<String>,
    #[arg(help = "License header file")]
    pub license: Option<String>,
    #[arg(help = "Source root to scan (default: current dir)")]
    pub path: Option<String>,
    #[arg(help = "File extensions to check, with or without the leading dot")]
    pub extensions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags_and_positionals() {
        let cli = Cli::try_parse_from([
            "lhc", "-a", "-r", "-v", "-i", "node_modules,client/assets", "-e", "^//.*", "lic.txt", "src",
            "ts", "js",
        ])
        .unwrap();
        assert!(cli.add && cli.replace && cli.verbose);
        assert_eq!(cli.ignore, vec!["node_modules", "client/assets"]);
        assert_eq!(cli.header_regex.as_deref(), Some("^//.*"));
        assert_eq!(cli.license.as_deref(), Some("lic.txt"));
        assert_eq!(cli.path.as_deref(), Some("src"));
        assert_eq!(cli.extensions, vec!["ts", "js"]);
    }

    #[test]
    fn test_everything_optional() {
        let cli = Cli::try_parse_from(["lhc"]).unwrap();
        assert!(!cli.add && !cli.replace);
        assert!(cli.license.is_none() && cli.path.is_none());
        assert!(cli.extensions.is_empty());
    }
}
