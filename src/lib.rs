//! OGEC Admin Library
//!
//! Backend pieces of the OGEC youth-education admin dashboard.
//!
//! This library provides tools for:
//! - Exporting staff, program, child and content records as quoted CSV
//! - Importing CSV uploads back into records with best-effort type inference
//! - Typed dashboard entities with explicit optional fields
//! - Storing organisation content behind a repository abstraction
//! - Delivering exported documents to a directory or to memory

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_codec;
        pub mod org_content;
    }
    pub mod adapters {
        pub mod download;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColumnDescriptor, ColumnFormat, Record, Value};
pub use app::services::csv_codec::{
    DecodeOptions, DecodeResult, EncodeOptions, decode, encode, export_to_csv, import_from_csv,
};
pub use config::Config;
pub use error::{Error, Result};
