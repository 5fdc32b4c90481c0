//! Command-line argument definitions for the OGEC admin tool
//!
//! Defines the CLI interface using the clap derive API.

use crate::app::models::ColumnDescriptor;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the OGEC admin tool
///
/// Exports dashboard records to CSV and imports CSV uploads back into
/// JSON records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ogec-admin",
    version,
    about = "Import and export OGEC dashboard records as CSV",
    long_about = "Command-line companion to the OGEC admin dashboard. Exports records \
                  (JSON input or built-in presets) as always-quoted, CRLF-delimited CSV, \
                  and imports CSV files back into typed JSON records."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file (TOML)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Export records to a CSV file
    Export(ExportArgs),
    /// Import a CSV file into JSON records
    Import(ImportArgs),
}

/// Built-in record sources for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// The organisation content blocks
    OrgContent,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// JSON file holding an array of flat objects
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        conflicts_with = "preset",
        required_unless_present = "preset"
    )]
    pub input: Option<PathBuf>,

    /// Columns as `key:Label[:format]`, comma-separated
    ///
    /// Format is one of auto, date or text. Required with --input.
    #[arg(long = "columns", value_name = "LIST")]
    pub columns: Option<String>,

    /// Export a built-in record set instead of a JSON file
    #[arg(long = "preset", value_enum)]
    pub preset: Option<Preset>,

    /// Name of the produced file
    #[arg(short = 'f', long = "filename", default_value = "export.csv")]
    pub filename: String,

    /// Directory to write into (overrides the config file)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// chrono layout for date columns (overrides the config file)
    #[arg(long = "date-format", value_name = "LAYOUT")]
    pub date_format: Option<String>,
}

impl ExportArgs {
    /// Column descriptors from `--columns`, if given
    pub fn parse_columns(&self) -> Result<Option<Vec<ColumnDescriptor>>> {
        self.columns
            .as_deref()
            .map(ColumnDescriptor::parse_list)
            .transpose()
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.is_some() && self.columns.is_none() {
            return Err(Error::configuration("--columns is required with --input"));
        }
        if self.filename.trim().is_empty() {
            return Err(Error::configuration("--filename must not be empty"));
        }
        Ok(())
    }
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// CSV file to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the JSON records here instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read 1/0 as booleans instead of numbers
    #[arg(long = "numeric-flags-as-bool")]
    pub numeric_flags_as_bool: bool,

    /// chrono layout the dates were exported with (defaults to export.date_format)
    #[arg(long = "date-format", value_name = "LAYOUT")]
    pub date_format: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pub pretty: bool,
}

impl Args {
    /// Tracing level derived from -v / -q
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_with_input_and_columns() {
        let args = Args::try_parse_from([
            "ogec-admin",
            "export",
            "--input",
            "members.json",
            "--columns",
            "name:Name,age:Age",
            "-f",
            "members.csv",
        ])
        .unwrap();

        let Some(Commands::Export(export)) = args.command else {
            panic!("expected export command");
        };
        assert_eq!(export.filename, "members.csv");
        assert!(export.validate().is_ok());
        assert_eq!(export.parse_columns().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_export_requires_a_source() {
        assert!(Args::try_parse_from(["ogec-admin", "export"]).is_err());
    }

    #[test]
    fn test_export_input_and_preset_conflict() {
        let result = Args::try_parse_from([
            "ogec-admin",
            "export",
            "--input",
            "x.json",
            "--preset",
            "org-content",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_input_without_columns_fails_validation() {
        let args = Args::try_parse_from(["ogec-admin", "export", "--input", "x.json"]).unwrap();
        let Some(Commands::Export(export)) = args.command else {
            panic!("expected export command");
        };
        assert!(export.validate().is_err());
    }

    #[test]
    fn test_import_args() {
        let args = Args::try_parse_from([
            "ogec-admin",
            "import",
            "people.csv",
            "--numeric-flags-as-bool",
            "--date-format",
            "%d/%m/%Y",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        let Some(Commands::Import(import)) = args.command else {
            panic!("expected import command");
        };
        assert_eq!(import.file, PathBuf::from("people.csv"));
        assert!(import.numeric_flags_as_bool);
        assert_eq!(import.date_format.as_deref(), Some("%d/%m/%Y"));
    }

    #[test]
    fn test_log_levels() {
        let quiet = Args::try_parse_from(["ogec-admin", "-q"]).unwrap();
        assert_eq!(quiet.get_log_level(), "error");

        let default = Args::try_parse_from(["ogec-admin"]).unwrap();
        assert_eq!(default.get_log_level(), "warn");
        assert!(default.command.is_none());
    }
}
