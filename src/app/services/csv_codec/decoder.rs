//! CSV import
//!
//! Reading is the only async step; once the text is in memory decoding is a
//! synchronous pass over the lines. Rows whose field count disagrees with the
//! header are dropped with a warning instead of failing the import.

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

use super::line_splitter::{split_csv_line, strip_outer_quotes};
use super::stats::{DecodeResult, DecodeStats};
use super::type_inference::infer_value;
use crate::app::models::Record;
use crate::config::Config;
use crate::constants::{CRLF, LF, MIN_DOCUMENT_LINES};
use crate::{Error, Result};

const BOM: char = '\u{feff}';

/// Type inference options for imports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Read `1` / `0` as booleans instead of numbers
    pub numeric_flags_as_bool: bool,
    /// Layout tried first under date headers, normally the export layout
    pub date_format: Option<String>,
}

impl DecodeOptions {
    pub fn with_numeric_flags_as_bool(mut self) -> Self {
        self.numeric_flags_as_bool = true;
        self
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = Some(date_format.into());
        self
    }
}

impl From<&Config> for DecodeOptions {
    fn from(config: &Config) -> Self {
        Self {
            numeric_flags_as_bool: config.import.numeric_flags_as_bool,
            date_format: Some(config.export.date_format.clone()),
        }
    }
}

/// Split a document into lines, CRLF first with an LF fallback
pub fn split_lines(contents: &str) -> Vec<&str> {
    let lines: Vec<&str> = contents.split(CRLF).collect();
    if lines.len() == 1 {
        contents.split(LF).collect()
    } else {
        lines
    }
}

/// Decode CSV text into records keyed by header name
pub fn decode(contents: &str, options: &DecodeOptions) -> Result<DecodeResult> {
    let contents = contents.strip_prefix(BOM).unwrap_or(contents);
    let lines = split_lines(contents);

    if lines.len() < MIN_DOCUMENT_LINES {
        return Err(Error::invalid_format());
    }

    let headers: Vec<String> = split_csv_line(lines[0])
        .iter()
        .map(|header| strip_outer_quotes(header).to_string())
        .collect();
    debug!("Parsed header with {} columns: {:?}", headers.len(), headers);

    let mut stats = DecodeStats::new();
    let mut records = Vec::new();

    for (index, raw_line) in lines.iter().enumerate().skip(1) {
        let line = raw_line.trim();
        if line.is_empty() {
            stats.blank_lines += 1;
            continue;
        }
        stats.total_rows += 1;

        let fields = split_csv_line(line);
        if fields.len() != headers.len() {
            let message = format!(
                "Line {} has {} values but header has {} columns",
                index + 1,
                fields.len(),
                headers.len()
            );
            warn!("{}", message);
            stats.skip(message);
            continue;
        }

        let mut record = Record::with_capacity(headers.len());
        for (header, field) in headers.iter().zip(&fields) {
            let value = strip_outer_quotes(field).trim();
            record.insert(header.clone(), infer_value(header, value, options));
        }

        records.push(record);
        stats.records_decoded += 1;
    }

    Ok(DecodeResult {
        headers,
        records,
        stats,
    })
}

/// Read a whole source and decode it
///
/// `source_name` only labels errors and logs.
pub async fn import_from_reader<R>(
    mut reader: R,
    source_name: &str,
    options: &DecodeOptions,
) -> Result<DecodeResult>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| Error::read_failure(source_name, e))?;

    let contents = String::from_utf8(bytes).map_err(|e| {
        Error::csv_parsing(format!("'{}' is not valid UTF-8: {}", source_name, e), None)
    })?;

    let result = decode(&contents, options)?;
    info!(
        "Imported {} records from '{}' ({} rows skipped)",
        result.stats.records_decoded, source_name, result.stats.rows_skipped
    );
    Ok(result)
}

/// Open `path` and decode its contents
pub async fn import_from_csv(path: &Path, options: &DecodeOptions) -> Result<DecodeResult> {
    let name = path.display().to_string();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| Error::read_failure(name.as_str(), e))?;

    import_from_reader(file, &name, options).await
}
