//! Date recognition and scalar type inference for CSV fields
//!
//! Exports and imports share the date recognition rules so that a column
//! written by the encoder reads back as the same calendar day.

use super::decoder::DecodeOptions;
use crate::app::models::Value;
use crate::constants::{
    ACCEPTED_DATE_FORMATS, ACCEPTED_DATETIME_FORMATS, DATE_KEY_MARKER, FALSY_VALUES,
    IMPORT_DATE_FORMAT, TRUTHY_VALUES,
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// A value recognised as a date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// A calendar day or a timestamp without offset
    Calendar(NaiveDate),
    /// A timestamp carrying an explicit offset
    Instant(DateTime<FixedOffset>),
}

impl ParsedDate {
    /// Calendar day as seen from `tz`; plain calendar days never shift
    pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            ParsedDate::Calendar(day) => *day,
            ParsedDate::Instant(instant) => instant.with_timezone(tz).date_naive(),
        }
    }
}

/// Try the accepted date and timestamp layouts in order
pub fn parse_date(value: &str) -> Option<ParsedDate> {
    parse_date_with_layout(value, None)
}

/// Like [`parse_date`], trying `layout` before the accepted layouts
///
/// Imports pass the configured export layout here, so a day written as
/// `05/03/2024` under `%d/%m/%Y` is not read back as the US `%m/%d/%Y` form.
pub fn parse_date_with_layout(value: &str, layout: Option<&str>) -> Option<ParsedDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(layout) = layout {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(ParsedDate::Calendar(naive.date()));
        }
        if let Ok(day) = NaiveDate::parse_from_str(value, layout) {
            return Some(ParsedDate::Calendar(day));
        }
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(ParsedDate::Instant(instant));
    }

    if let Some(naive) = ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(ParsedDate::Calendar(naive.date()));
    }

    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .map(ParsedDate::Calendar)
}

/// Export-side date detection: case-sensitive match on the field name
pub fn is_date_key(key: &str) -> bool {
    key.contains(DATE_KEY_MARKER)
}

/// Import-side date detection: case-insensitive match on the header
pub fn is_date_header(header: &str) -> bool {
    header.to_lowercase().contains(DATE_KEY_MARKER)
}

/// Parse a value that must be a finite number in full
pub fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Read a boolean flag (`true`/`yes`, `false`/`no`, optionally `1`/`0`)
pub fn parse_flag(value: &str, numeric_flags_as_bool: bool) -> Option<bool> {
    let matches = |set: &[&str], numeric: &str| {
        set.iter().any(|s| value.eq_ignore_ascii_case(s))
            || (numeric_flags_as_bool && value == numeric)
    };

    if matches(TRUTHY_VALUES, "1") {
        Some(true)
    } else if matches(FALSY_VALUES, "0") {
        Some(false)
    } else {
        None
    }
}

/// Infer the scalar type of a cleaned field
///
/// Priority: dates under date headers, then flags, then numbers, then text.
pub fn infer_value(header: &str, value: &str, options: &DecodeOptions) -> Value {
    if is_date_header(header) {
        if let Some(date) = parse_date_with_layout(value, options.date_format.as_deref()) {
            let day = date.day_in(&chrono::Utc);
            return Value::Text(day.format(IMPORT_DATE_FORMAT).to_string());
        }
    }

    if let Some(flag) = parse_flag(value, options.numeric_flags_as_bool) {
        return Value::Bool(flag);
    }

    if let Some(number) = parse_number(value) {
        return Value::Number(number);
    }

    Value::Text(value.to_string())
}
