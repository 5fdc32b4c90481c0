//! Configuration management and validation.
//!
//! Settings for CSV export rendering and delivery and for import type
//! inference. Every field has a default, so a config file only needs the
//! values it changes.

use crate::constants::{
    APP_CONFIG_DIR, CONFIG_FILE_NAME, DEFAULT_EXPORT_DATE_FORMAT, DEFAULT_OUTPUT_DIR,
    DEFAULT_RELEASE_DELAY_MS,
};
use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// chrono layout for date columns
    pub date_format: String,

    /// Delay before the staged download handle is released, in milliseconds
    pub release_delay_ms: u64,

    /// Directory exported files are written to
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_EXPORT_DATE_FORMAT.to_string(),
            release_delay_ms: DEFAULT_RELEASE_DELAY_MS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Import settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Read `1` / `0` as booleans rather than numbers
    pub numeric_flags_as_bool: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportConfig,
    pub import: ImportConfig,
}

impl Config {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config: Config = toml::from_str(&text)
            .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| Error::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path first, then the user config file, then defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `<user config dir>/ogec-admin/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.export.date_format.trim().is_empty() {
            return Err(Error::configuration("export.date_format must not be empty"));
        }
        if StrftimeItems::new(&self.export.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::configuration(format!(
                "export.date_format '{}' is not a valid date layout",
                self.export.date_format
            )));
        }
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(Error::configuration("export.output_dir must not be empty"));
        }
        Ok(())
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.export.date_format = date_format.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.export.output_dir = output_dir.into();
        self
    }

    pub fn with_release_delay_ms(mut self, delay_ms: u64) -> Self {
        self.export.release_delay_ms = delay_ms;
        self
    }

    pub fn with_numeric_flags_as_bool(mut self) -> Self {
        self.import.numeric_flags_as_bool = true;
        self
    }
}
