//! Configuration discovery and effective settings resolution.
//!
//! An optional `lhc.toml|yaml|yml` is looked up from the scan path upward
//! (stopping at the first directory holding one, or a `.git` directory), or
//! taken from `--config`. It is merged with CLI flags into an `Effective`
//! config. Paths inside the file are relative to the file's directory.
//! Defaults:
//! - `path`: `.`
//! - `output`: `human`
//! - `add`, `replace`, `verbose`: false
//! - `ignore`: none
//! - `headerRegex`: the built-in `/* ... */` matcher
//! - `workers.max_threads`: 0 (auto), `workers.thread_percentage`: 75
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::cli::Cli;
use crate::models::Options;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["lhc.toml", "lhc.yaml", "lhc.yml"];
const DEFAULT_THREAD_PERCENTAGE: u8 = 75;

#[derive(Debug, Default, Deserialize, Clone)]
/// Worker pool section under `[workers]`.
pub struct WorkersCfg {
    pub max_threads: Option<usize>,
    pub thread_percentage: Option<u8>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `lhc.toml|yaml`.
pub struct LhcConfig {
    pub license: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
    pub add: Option<bool>,
    pub replace: Option<bool>,
    pub verbose: Option<bool>,
    pub output: Option<String>,
    #[serde(rename = "headerRegex", alias = "header_regex")]
    pub header_regex: Option<String>,
    #[serde(default)]
    pub workers: Option<WorkersCfg>,
}

/// Errors raised while building the effective configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("license header path is not configured. Pass it as first argument or set `license` in lhc.toml.")]
    MissingLicense,
    #[error("no file extensions configured. Pass them after the source path or set `extensions` in lhc.toml.")]
    NoExtensions,
    #[error("output must be human or json, got '{0}'")]
    InvalidOutput(String),
    #[error(transparent)]
    HeaderRegex(#[from] crate::Error),
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub options: Options,
    pub output: String,
    pub verbose: bool,
    /// Config file that contributed settings, if any.
    pub config_file: Option<PathBuf>,
}

/// Walk upward from `start` to the directory holding a config file.
///
/// Stops when an `lhc.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let start = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or(start)
    } else {
        start
    };
    let mut cur = start.as_path();
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).is_file()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.clone(),
        }
    }
}

/// First config file present in `dir`.
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| dir.join(f))
        .find(|p| p.is_file())
}

/// Load `LhcConfig` from a TOML or YAML file (by extension).
pub fn load_config(path: &Path) -> Result<LhcConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Turn `js`, `.js` and ` .js ` into `.js`; drop empties.
pub fn normalize_extensions<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty() && e != ".")
        .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
        .collect()
}

fn normalize_ignores(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Compile a user supplied header pattern.
pub fn compile_header_regex(pattern: &str) -> Result<Regex, crate::Error> {
    Ok(Regex::new(pattern)?)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Cli) -> Result<Effective, ConfigError> {
    let (cfg, config_file) = match cli.config.as_deref() {
        Some(explicit) => {
            let p = PathBuf::from(explicit);
            (load_config(&p)?, Some(p))
        }
        None => {
            let start = PathBuf::from(cli.path.as_deref().unwrap_or("."));
            let root = detect_config_root(&start);
            match find_config_file(&root) {
                Some(p) => (load_config(&p)?, Some(p)),
                None => (LhcConfig::default(), None),
            }
        }
    };
    let cfg_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let from_cfg = |rel: &str| cfg_dir.join(rel);

    let license_path = cli
        .license
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| cfg.license.as_deref().map(from_cfg))
        .ok_or(ConfigError::MissingLicense)?;

    let path = cli
        .path
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| cfg.path.as_deref().map(from_cfg))
        .unwrap_or_else(|| PathBuf::from("."));

    let extensions = if !cli.extensions.is_empty() {
        normalize_extensions(&cli.extensions)
    } else {
        normalize_extensions(cfg.extensions.clone().unwrap_or_default())
    };
    if extensions.is_empty() {
        return Err(ConfigError::NoExtensions);
    }

    let ignore_paths = if !cli.ignore.is_empty() {
        normalize_ignores(cli.ignore.clone())
    } else {
        normalize_ignores(cfg.ignore.clone().unwrap_or_default())
    };

    let header_regex = cli
        .header_regex
        .as_deref()
        .or(cfg.header_regex.as_deref())
        .filter(|p| !p.is_empty())
        .map(compile_header_regex)
        .transpose()?;

    let output = cli
        .output
        .clone()
        .or(cfg.output.clone())
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ConfigError::InvalidOutput(output));
    }

    let workers = cfg.workers.clone().unwrap_or_default();
    let options = Options {
        add: cli.add || cfg.add.unwrap_or(false),
        replace: cli.replace || cfg.replace.unwrap_or(false),
        path,
        license_path,
        extensions,
        ignore_paths,
        header_regex,
        max_threads: cli.max_threads.or(workers.max_threads).unwrap_or(0),
        thread_percentage: workers
            .thread_percentage
            .unwrap_or(DEFAULT_THREAD_PERCENTAGE),
    };

    Ok(Effective {
        options,
        output,
        verbose: cli.verbose || cfg.verbose.unwrap_or(false),
        config_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["lhc"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_cli_only() {
        let dir = tempdir().unwrap();
        let src = dir.path().to_string_lossy().to_string();
        let cli = parse(&["-a", "-i", "node_modules,client/assets", "license-path", &src, "js", ".ts"]);
        let eff = resolve_effective(&cli).unwrap();
        assert!(eff.options.add);
        assert!(!eff.options.replace);
        assert_eq!(eff.options.license_path, PathBuf::from("license-path"));
        assert_eq!(eff.options.path, PathBuf::from(&src));
        assert_eq!(eff.options.extensions, vec![".js", ".ts"]);
        assert_eq!(eff.options.ignore_paths, vec!["node_modules", "client/assets"]);
        assert!(eff.options.header_regex.is_none());
        assert_eq!(eff.options.thread_percentage, 75);
        assert_eq!(eff.output, "human");
        assert!(eff.config_file.is_none());
    }

    #[test]
    fn test_missing_license_and_extensions() {
        let dir = tempdir().unwrap();
        let src = dir.path().to_string_lossy().to_string();
        let cli = parse(&["--config", "/nonexistent/lhc.toml"]);
        assert!(matches!(resolve_effective(&cli), Err(ConfigError::Read { .. })));

        fs::write(dir.path().join("lhc.toml"), "").unwrap();
        let cli = parse(&[]);
        let mut cli_with_path = cli;
        cli_with_path.path = Some(src.clone());
        assert!(matches!(
            resolve_effective(&cli_with_path),
            Err(ConfigError::MissingLicense)
        ));

        let cli = parse(&["license-path", &src]);
        assert!(matches!(resolve_effective(&cli), Err(ConfigError::NoExtensions)));
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/deep")).unwrap();
        let mut f = fs::File::create(root.join("lhc.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
license = "tools/header.txt"
extensions = ["rs", ".toml"]
ignore = ["target", "vendor/generated"]
add = true
output = "json"
verbose = true
headerRegex = '(?s)\A//[^\n]*'
[workers]
max_threads = 2
thread_percentage = 50
"#
        )
        .unwrap();

        let deep = root.join("src/deep").to_string_lossy().to_string();
        let mut cli = parse(&[]);
        cli.path = Some(deep.clone());
        let eff = resolve_effective(&cli).unwrap();
        let cfg_file = eff.config_file.clone().unwrap();
        assert_eq!(cfg_file.file_name().unwrap(), "lhc.toml");
        assert!(eff.options.license_path.ends_with("tools/header.txt"));
        assert_eq!(eff.options.path, PathBuf::from(deep));
        assert_eq!(eff.options.extensions, vec![".rs", ".toml"]);
        assert_eq!(eff.options.ignore_paths, vec!["target", "vendor/generated"]);
        assert!(eff.options.add);
        assert!(!eff.options.replace);
        assert!(eff.options.header_regex.is_some());
        assert_eq!(eff.options.max_threads, 2);
        assert_eq!(eff.options.thread_percentage, 50);
        assert_eq!(eff.output, "json");
        assert!(eff.verbose);
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("lhc.yaml"),
            "license: header.txt\nextensions: [js]\nignore: [dist]\noutput: json\n",
        )
        .unwrap();
        let src = root.to_string_lossy().to_string();
        let cli = parse(&[
            "-r",
            "-i",
            "build",
            "--output",
            "human",
            "--max-threads",
            "1",
            "other.txt",
            &src,
            "ts",
        ]);
        let eff = resolve_effective(&cli).unwrap();
        assert!(eff.options.replace);
        assert_eq!(eff.options.license_path, PathBuf::from("other.txt"));
        assert_eq!(eff.options.extensions, vec![".ts"]);
        assert_eq!(eff.options.ignore_paths, vec!["build"]);
        assert_eq!(eff.options.max_threads, 1);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_invalid_header_regex_and_output() {
        let dir = tempdir().unwrap();
        let src = dir.path().to_string_lossy().to_string();
        let cli = parse(&["-e", "(unclosed", "lic", &src, "c"]);
        assert!(matches!(resolve_effective(&cli), Err(ConfigError::HeaderRegex(_))));

        let cli = parse(&["--output", "xml", "lic", &src, "c"]);
        assert!(matches!(resolve_effective(&cli), Err(ConfigError::InvalidOutput(_))));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lhc.toml"), "extensions = [").unwrap();
        let mut cli = parse(&[]);
        cli.path = Some(dir.path().to_string_lossy().to_string());
        assert!(matches!(resolve_effective(&cli), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn test_normalize_extensions() {
        assert_eq!(
            normalize_extensions(["js", " .ts ", "", ".", "cpp"]),
            vec![".js", ".ts", ".cpp"]
        );
    }
}
