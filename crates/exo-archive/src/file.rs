//! File source: reads a JSON dump of the archive response from disk.

use crate::{error::ArchiveError, source::ArchiveSource};
use exo_core::RawRecord;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveSource for FileSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ArchiveError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records: Vec<RawRecord> = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "read archive file");
        Ok(records)
    }
}
