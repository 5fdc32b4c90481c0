//! Quoted-field splitting for single CSV lines
//!
//! Lines are split before any type handling happens, so embedded commas and
//! doubled quotes inside quoted fields survive intact.

use crate::constants::{FIELD_SEPARATOR, QUOTE};

/// Split one CSV line into raw fields
///
/// A quote toggles the in-quotes state, except that a doubled quote inside a
/// quoted section produces one literal quote. Commas end a field only outside
/// quotes. The last field needs no trailing separator, so an empty line
/// yields a single empty field.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            FIELD_SEPARATOR if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }

    fields.push(current);
    fields
}

/// Remove one layer of surrounding quotes
///
/// Only applies when at least one character sits between the quotes, so a
/// bare `""` is returned unchanged.
pub fn strip_outer_quotes(value: &str) -> &str {
    let quote_len = QUOTE.len_utf8();
    if value.len() > 2 * quote_len && value.starts_with(QUOTE) && value.ends_with(QUOTE) {
        &value[quote_len..value.len() - quote_len]
    } else {
        value
    }
}
