//! Error types for the OGEC admin backend
//!
//! One enum covers the CSV codec, the content repository, download delivery
//! and configuration. Constructor helpers keep call sites short.

use crate::constants::messages;

/// Result type alias for the admin backend
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for import, export and repository operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying file could not be read
    #[error("{} ({path})", messages::READ_FAILURE)]
    ReadFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document has no data rows
    #[error("{}", messages::INVALID_FORMAT)]
    InvalidFormat,

    /// Unexpected failure while turning CSV text into records (or back)
    #[error("{}: {message}", messages::PARSE_FAILURE)]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialisation failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A download could not be delivered to its sink
    #[error("Download of '{filename}' failed: {message}")]
    Download { filename: String, message: String },

    /// A value cannot be represented as a flat record
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a read failure for the given path
    pub fn read_failure(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format() -> Self {
        Self::InvalidFormat
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a download delivery error
    pub fn download(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for errors that mean the input was not usable CSV
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidFormat | Self::CsvParsing { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
