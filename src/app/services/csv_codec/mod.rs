//! CSV import/export for dashboard records
//!
//! Turns a sequence of uniformly-shaped [`Record`](crate::app::models::Record)s
//! into quoted CSV text and back.
//!
//! ## Architecture
//!
//! - [`encoder`] - column rendering and document assembly, delivery to a sink
//! - [`decoder`] - line splitting, header handling, row assembly, file reading
//! - [`line_splitter`] - the quoted-field splitter shared by both directions
//! - [`type_inference`] - date recognition and scalar inference
//! - [`stats`] - decode statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use ogec_admin::app::models::{ColumnDescriptor, Record};
//! use ogec_admin::app::services::csv_codec::{decode, encode, DecodeOptions, EncodeOptions};
//!
//! # fn example() -> ogec_admin::Result<()> {
//! let columns = vec![ColumnDescriptor::new("name", "Name"), ColumnDescriptor::new("age", "Age")];
//! let records = vec![Record::new().with("name", "Ann").with("age", 5)];
//!
//! let body = encode(&records, &columns, &EncodeOptions::default())?.unwrap_or_default();
//! assert_eq!(body, "\"Name\",\"Age\"\r\n\"Ann\",\"5\"");
//!
//! let result = decode(&body, &DecodeOptions::default())?;
//! assert_eq!(result.records.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod encoder;
pub mod line_splitter;
pub mod stats;
pub mod type_inference;

#[cfg(test)]
mod tests;

pub use decoder::{DecodeOptions, decode, import_from_csv, import_from_reader, split_lines};
pub use encoder::{EncodeOptions, encode, export_to_csv, render_field};
pub use line_splitter::{split_csv_line, strip_outer_quotes};
pub use stats::{DecodeResult, DecodeStats};
