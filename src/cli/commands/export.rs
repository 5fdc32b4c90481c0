//! Export command: records to a CSV file

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::*;
use tracing::info;

use super::shared::CommandSummary;
use crate::app::adapters::download::FileSystemDownloads;
use crate::app::models::domain::{Exportable, to_records};
use crate::app::models::{OrgContent, Record};
use crate::app::services::csv_codec::{EncodeOptions, export_to_csv};
use crate::app::services::org_content::{InMemoryOrgContentRepository, OrgContentRepository};
use crate::cli::args::{ExportArgs, Preset};
use crate::config::Config;

/// Run the export command
pub async fn run_export(args: &ExportArgs, config: &Config) -> Result<CommandSummary> {
    args.validate()?;

    let mut config = config.clone();
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(layout) = &args.date_format {
        config.export.date_format = layout.clone();
    }
    config.validate()?;

    let (records, columns) = match (&args.input, args.preset) {
        (Some(path), _) => {
            let columns = args.parse_columns()?.unwrap_or_default();
            (load_records(path).await?, columns)
        }
        (None, Some(Preset::OrgContent)) => {
            let repository = InMemoryOrgContentRepository::with_default_content();
            let items = repository.list().await?;
            let columns = args
                .parse_columns()?
                .unwrap_or_else(OrgContent::export_columns);
            (to_records(&items)?, columns)
        }
        (None, None) => bail!("Nothing to export: pass --input or --preset"),
    };

    info!(
        "Exporting {} records with columns {:?}",
        records.len(),
        columns.iter().map(|c| c.key.as_str()).collect::<Vec<_>>()
    );

    let sink = FileSystemDownloads::from_config(&config.export);
    let receipt = export_to_csv(
        &records,
        &columns,
        &args.filename,
        &sink,
        &EncodeOptions::from(&config.export),
    )
    .await
    .with_context(|| format!("Failed to export '{}'", args.filename))?;

    match receipt {
        Some(receipt) => {
            let location = receipt.location.clone();
            if let Some(path) = &location {
                println!(
                    "{} {} records to {} ({} bytes)",
                    "Exported".bright_green().bold(),
                    records.len(),
                    path.display().to_string().bright_cyan(),
                    receipt.bytes
                );
            }
            Ok(CommandSummary {
                records: records.len(),
                rows_skipped: 0,
                output: location,
            })
        }
        None => {
            println!("{}", "Nothing to export: no records".yellow());
            Ok(CommandSummary::default())
        }
    }
}

/// Read a JSON array of flat objects
async fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of flat objects", path.display()))?;
    Ok(records)
}
