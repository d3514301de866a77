//! Logging setup for the binary.
//!
//! Installs a global tracing subscriber writing to stderr so stdout stays
//! reserved for the report (and parseable in JSON mode).

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` and the
/// default is `warn`.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .with_writer(std::io::stderr);
    let subscriber = Registry::default()
        .with(build_env_filter(verbose))
        .with(layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
}
