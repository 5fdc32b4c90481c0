//! Delivery of exported documents
//!
//! An export ends by handing a [`CsvDownload`] to a [`DownloadSink`].
//! [`FileSystemDownloads`] writes it into a directory; [`MemoryDownloads`]
//! keeps it in memory.
//!
//! The filesystem sink first stages the body in a temporary file (the handle
//! the download is served from), copies it to its destination, then releases
//! the staged handle after a short delay on the runtime.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::constants::{CSV_MIME_TYPE, DEFAULT_RELEASE_DELAY_MS};
use crate::{Error, Result};

/// A finished document ready to be saved by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub filename: String,
    pub mime_type: String,
    pub body: String,
}

impl CsvDownload {
    pub fn new(filename: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: CSV_MIME_TYPE.to_string(),
            body: body.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What a sink did with a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub filename: String,
    pub bytes: usize,
    /// Where the document ended up, for sinks that write somewhere
    pub location: Option<PathBuf>,
}

/// Destination for exported documents
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn deliver(&self, download: CsvDownload) -> Result<DeliveryReceipt>;
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct FileSystemDownloads {
    output_dir: PathBuf,
    release_delay: Duration,
}

impl FileSystemDownloads {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            release_delay: Duration::from_millis(DEFAULT_RELEASE_DELAY_MS),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir).with_release_delay(Duration::from_millis(config.release_delay_ms))
    }

    pub fn with_release_delay(mut self, delay: Duration) -> Self {
        self.release_delay = delay;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination for `filename`; path components are stripped
    fn destination(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| Error::download(filename, "filename has no final component"))?;
        Ok(self.output_dir.join(name))
    }

    fn stage(&self, download: &CsvDownload) -> Result<NamedTempFile> {
        use std::io::Write;

        let mut staged = NamedTempFile::new()
            .map_err(|e| Error::io("Failed to stage download", e))?;
        staged
            .write_all(download.body.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(|e| Error::io("Failed to write staged download", e))?;
        Ok(staged)
    }

    /// Drop the staged handle once the delay has passed
    fn schedule_release(&self, staged: NamedTempFile) {
        let delay = self.release_delay;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = staged.close() {
                        warn!("Failed to release staged download: {}", e);
                    }
                });
            }
            // No runtime: the handle is released on drop right away
            Err(_) => drop(staged),
        }
    }
}

#[async_trait]
impl DownloadSink for FileSystemDownloads {
    async fn deliver(&self, download: CsvDownload) -> Result<DeliveryReceipt> {
        let destination = self.destination(&download.filename)?;
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| Error::io(format!("Failed to create {}", self.output_dir.display()), e))?;

        let staged = self.stage(&download)?;
        debug!(
            "Staged '{}' ({}) at {}",
            download.filename,
            download.mime_type,
            staged.path().display()
        );

        let copied = tokio::fs::copy(staged.path(), &destination).await;
        self.schedule_release(staged);
        copied.map_err(|e| {
            Error::download(&download.filename, format!("copy to {} failed: {}", destination.display(), e))
        })?;

        info!("Saved '{}' to {}", download.filename, destination.display());
        Ok(DeliveryReceipt {
            filename: download.filename,
            bytes: download.body.len(),
            location: Some(destination),
        })
    }
}

/// Keeps every delivered download in memory
#[derive(Debug, Default)]
pub struct MemoryDownloads {
    delivered: Mutex<Vec<CsvDownload>>,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far
    pub fn downloads(&self) -> Vec<CsvDownload> {
        self.delivered
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl DownloadSink for MemoryDownloads {
    async fn deliver(&self, download: CsvDownload) -> Result<DeliveryReceipt> {
        let receipt = DeliveryReceipt {
            filename: download.filename.clone(),
            bytes: download.body.len(),
            location: None,
        };
        self.delivered
            .lock()
            .map_err(|_| Error::download(&download.filename, "download store is poisoned"))?
            .push(download);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_delivery_writes_body() {
        let dir = TempDir::new().unwrap();
        let sink = FileSystemDownloads::new(dir.path()).with_release_delay(Duration::from_millis(1));

        let receipt = sink
            .deliver(CsvDownload::new("members.csv", "\"Name\"\r\n\"Ann\""))
            .await
            .unwrap();

        let location = receipt.location.unwrap();
        assert_eq!(location, dir.path().join("members.csv"));
        assert_eq!(std::fs::read_to_string(&location).unwrap(), "\"Name\"\r\n\"Ann\"");
        assert_eq!(receipt.bytes, 13);
    }

    #[tokio::test]
    async fn test_filesystem_delivery_strips_directories_from_filename() {
        let dir = TempDir::new().unwrap();
        let sink = FileSystemDownloads::new(dir.path());

        let receipt = sink
            .deliver(CsvDownload::new("../../escape.csv", "x"))
            .await
            .unwrap();

        assert_eq!(receipt.location.unwrap(), dir.path().join("escape.csv"));
    }

    #[tokio::test]
    async fn test_filesystem_delivery_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("2024");
        let sink = FileSystemDownloads::new(&nested);

        sink.deliver(CsvDownload::new("a.csv", "x")).await.unwrap();
        assert!(nested.join("a.csv").exists());
    }

    #[tokio::test]
    async fn test_memory_delivery() {
        let sink = MemoryDownloads::new();
        sink.deliver(CsvDownload::new("a.csv", "body")).await.unwrap();

        let downloads = sink.downloads();
        assert_eq!(sink.count(), 1);
        assert_eq!(downloads[0].mime_type, "text/csv;charset=utf-8;");
        assert_eq!(downloads[0].body, "body");
    }
}
