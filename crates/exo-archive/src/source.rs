//! Archive sources: where the raw planet array comes from.

use crate::{error::ArchiveError, file::FileSource, http::HttpSource};
use exo_core::RawRecord;
use std::future::Future;

/// A one-shot read of the full upstream array.
///
/// Implementations perform all their I/O inside `fetch_records`; the
/// ingestor calls it exactly once per run.
pub trait ArchiveSource {
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<RawRecord>, ArchiveError>>;
}

/// Source picked at runtime from the command line or config.
#[derive(Debug, Clone)]
pub enum AnySource {
    Http(HttpSource),
    File(FileSource),
}

impl AnySource {
    pub fn describe(&self) -> String {
        match self {
            AnySource::Http(s) => s.url().to_string(),
            AnySource::File(s) => s.path().display().to_string(),
        }
    }
}

impl ArchiveSource for AnySource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ArchiveError> {
        match self {
            AnySource::Http(s) => s.fetch_records().await,
            AnySource::File(s) => s.fetch_records().await,
        }
    }
}

/// In-memory source, handy for tests and benchmarks.
impl ArchiveSource for Vec<RawRecord> {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, ArchiveError> {
        Ok(self.clone())
    }
}
