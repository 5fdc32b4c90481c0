//! Application constants for the OGEC admin backend
//!
//! Delimiters, MIME types, default settings and the user-facing error texts
//! shared by the CSV codec and the CLI.

// =============================================================================
// CSV Document Format
// =============================================================================

/// Primary line delimiter for written and read documents
pub const CRLF: &str = "\r\n";

/// Fallback line delimiter accepted on read
pub const LF: &str = "\n";

/// Field separator
pub const FIELD_SEPARATOR: char = ',';

/// Quote character wrapping every written field
pub const QUOTE: char = '"';

/// MIME type attached to exported documents
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Minimum number of lines (header plus one row) for an importable document
pub const MIN_DOCUMENT_LINES: usize = 2;

// =============================================================================
// Type Inference
// =============================================================================

/// Substring that marks a column as holding dates
pub const DATE_KEY_MARKER: &str = "date";

/// Text written for boolean values
pub const EXPORT_TRUE: &str = "Yes";
pub const EXPORT_FALSE: &str = "No";

/// Values read back as `true` (case-insensitive)
pub const TRUTHY_VALUES: &[&str] = &["true", "yes"];

/// Values read back as `false` (case-insensitive)
pub const FALSY_VALUES: &[&str] = &["false", "no"];

/// Normalised form for decoded dates
pub const IMPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Naive date layouts tried on import and export, in order
pub const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Naive date-time layouts tried on import and export, in order
pub const ACCEPTED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// Defaults
// =============================================================================

/// Default date layout for exported date columns
pub const DEFAULT_EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Delay before a staged download handle is released
pub const DEFAULT_RELEASE_DELAY_MS: u64 = 100;

/// Default directory for exported files
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Application directory name under the user config dir
pub const APP_CONFIG_DIR: &str = "ogec-admin";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Messages
// =============================================================================

/// User-facing error texts
pub mod messages {
    pub const READ_FAILURE: &str = "Error reading file";
    pub const INVALID_FORMAT: &str = "Invalid CSV format: file has insufficient data";
    pub const PARSE_FAILURE: &str = "Error parsing CSV file";
}
