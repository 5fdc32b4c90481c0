//! CSV export
//!
//! Every field is quoted, lines are CRLF-joined and there is no trailing line
//! break. Rendering follows the column's [`ColumnFormat`]:
//!
//! - missing or null values become an empty field
//! - date columns (key containing `date`, or [`ColumnFormat::Date`]) are
//!   re-rendered with the configured date layout when they parse as dates
//! - booleans become `Yes` / `No`
//! - numbers are written plainly, without grouping separators
//! - everything else is written as text with embedded quotes doubled

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use super::type_inference::{is_date_key, parse_date};
use crate::app::adapters::download::{CsvDownload, DeliveryReceipt, DownloadSink};
use crate::app::models::{ColumnDescriptor, ColumnFormat, Record, Value};
use crate::config::ExportConfig;
use crate::constants::{CRLF, DEFAULT_EXPORT_DATE_FORMAT, EXPORT_FALSE, EXPORT_TRUE, IMPORT_DATE_FORMAT};
use crate::{Error, Result};

/// Rendering options for exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// chrono layout used for date columns
    pub date_format: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_EXPORT_DATE_FORMAT.to_string(),
        }
    }
}

impl From<&ExportConfig> for EncodeOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            date_format: config.date_format.clone(),
        }
    }
}

impl EncodeOptions {
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }
}

/// Build the CSV body for `records`
///
/// Returns `None` when there is nothing to export: no records, or no columns.
pub fn encode(
    records: &[Record],
    columns: &[ColumnDescriptor],
    options: &EncodeOptions,
) -> Result<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }
    if columns.is_empty() {
        warn!("Export of {} records requested without columns", records.len());
        return Ok(None);
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|column| column.label.as_str()))?;

    let mut cells = Vec::with_capacity(columns.len());
    for record in records {
        cells.clear();
        cells.extend(
            columns
                .iter()
                .map(|column| render_field(column, record.get(&column.key), options)),
        );
        writer.write_record(&cells)?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        Error::csv_parsing(format!("Failed to flush CSV writer: {}", e.error()), None)
    })?;
    let mut body = String::from_utf8(bytes)
        .map_err(|e| Error::csv_parsing(format!("Encoded CSV is not valid UTF-8: {}", e), None))?;

    if body.ends_with(CRLF) {
        body.truncate(body.len() - CRLF.len());
    }

    debug!(
        "Encoded {} records across {} columns ({} bytes)",
        records.len(),
        columns.len(),
        body.len()
    );
    Ok(Some(body))
}

/// Render one field as unquoted cell text
pub fn render_field(
    column: &ColumnDescriptor,
    value: Option<&Value>,
    options: &EncodeOptions,
) -> String {
    let value = match value {
        None | Some(Value::Null) => return String::new(),
        Some(value) => value,
    };

    let wants_date = match column.format {
        ColumnFormat::Auto => is_date_key(&column.key),
        ColumnFormat::Date => true,
        ColumnFormat::Text => false,
    };

    if wants_date {
        if let Some(day) = value.as_str().and_then(parse_date).map(|d| d.day_in(&Local)) {
            return format_day(day, &options.date_format);
        }
    }

    match (column.format, value) {
        (ColumnFormat::Text, other) => other.to_string(),
        (_, Value::Bool(true)) => EXPORT_TRUE.to_string(),
        (_, Value::Bool(false)) => EXPORT_FALSE.to_string(),
        (_, other) => other.to_string(),
    }
}

/// Format with a user-supplied layout, falling back to ISO on a bad layout
fn format_day(day: NaiveDate, layout: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", day.format(layout)).is_err() {
        out.clear();
        let _ = write!(out, "{}", day.format(IMPORT_DATE_FORMAT));
    }
    out
}

/// Encode `records` and hand the document to `sink` as `filename`
///
/// Empty input is a silent no-op: nothing is delivered and `Ok(None)` is
/// returned.
pub async fn export_to_csv<S>(
    records: &[Record],
    columns: &[ColumnDescriptor],
    filename: &str,
    sink: &S,
    options: &EncodeOptions,
) -> Result<Option<DeliveryReceipt>>
where
    S: DownloadSink + ?Sized,
{
    let Some(body) = encode(records, columns, options)? else {
        debug!("Nothing to export for '{}'", filename);
        return Ok(None);
    };

    info!("Exporting {} records to '{}'", records.len(), filename);
    let receipt = sink.deliver(CsvDownload::new(filename, body)).await?;
    Ok(Some(receipt))
}
