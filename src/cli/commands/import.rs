//! Import command: CSV file to JSON records

use anyhow::{Context, Result};
use colored::*;

use super::shared::CommandSummary;
use crate::app::services::csv_codec::{DecodeOptions, import_from_csv};
use crate::cli::args::ImportArgs;
use crate::config::Config;

/// Run the import command
///
/// Records go to stdout (or `--output`); the summary goes to stderr so the
/// JSON stays pipeable.
pub async fn run_import(args: &ImportArgs, config: &Config) -> Result<CommandSummary> {
    let mut options = DecodeOptions::from(config);
    if args.numeric_flags_as_bool {
        options.numeric_flags_as_bool = true;
    }
    if let Some(layout) = &args.date_format {
        options = options.with_date_format(layout.clone());
    }

    let result = match import_from_csv(&args.file, &options).await {
        Ok(result) => result,
        Err(error) => {
            if error.is_format_error() {
                eprintln!(
                    "{} expected a header line followed by at least one data row, UTF-8 encoded",
                    "Hint:".yellow().bold()
                );
            }
            return Err(anyhow::Error::new(error)
                .context(format!("Failed to import {}", args.file.display())));
        }
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&result.records)
    } else {
        serde_json::to_string(&result.records)
    }
    .context("Failed to serialise imported records")?;

    match &args.output {
        Some(path) => tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }

    eprintln!(
        "{} {} records from {}",
        "Imported".bright_green().bold(),
        result.stats.records_decoded,
        args.file.display().to_string().bright_cyan()
    );
    if result.stats.has_skipped_rows() {
        eprintln!(
            "{} {} malformed rows skipped",
            "Warning:".yellow().bold(),
            result.stats.rows_skipped
        );
        for message in &result.stats.errors {
            eprintln!("  {}", message.bright_black());
        }
    }

    Ok(CommandSummary {
        records: result.stats.records_decoded,
        rows_skipped: result.stats.rows_skipped,
        output: args.output.clone(),
    })
}
