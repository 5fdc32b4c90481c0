//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the result summary used by
//! every command.

use crate::Config;
use crate::cli::args::Args;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// What a command did, for the final report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSummary {
    /// Records written or read
    pub records: usize,
    /// Rows dropped during import
    pub rows_skipped: usize,
    /// File produced, if any
    pub output: Option<PathBuf>,
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the -v / -q flags.
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ogec_admin={}", log_level)));

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from `--config`, the user config dir, or defaults
pub fn load_config(args: &Args) -> Result<Config> {
    Config::load_or_default(args.config_file.as_deref()).context("Failed to load configuration")
}
