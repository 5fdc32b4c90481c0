//! Command implementations for the OGEC admin CLI
//!
//! Each command lives in its own module:
//! - `export`: records (JSON file or preset) to a CSV file
//! - `import`: CSV file to JSON records
//! - `shared`: logging setup, config loading and the summary type

pub mod export;
pub mod import;
pub mod shared;

pub use shared::CommandSummary;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Installs logging, loads configuration, then dispatches to the
/// subcommand handler.
pub async fn run(args: Args) -> Result<CommandSummary> {
    shared::setup_logging(&args)?;
    let config = shared::load_config(&args)?;

    match &args.command {
        Some(Commands::Export(export_args)) => export::run_export(export_args, &config).await,
        Some(Commands::Import(import_args)) => import::run_import(import_args, &config).await,
        None => Ok(CommandSummary::default()),
    }
}
