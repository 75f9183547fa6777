//! Error taxonomy for archive reads.

use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong fetching the planet array. Ingestion routes
/// these to [`IngestObserver::on_error`](crate::IngestObserver::on_error);
/// they never escape the ingestor.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive answered with a non-2xx status.
    #[error("archive responded with HTTP {0}")]
    Status(u16),

    /// The body was not a JSON array of objects.
    #[error("failed to parse archive payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Connection, protocol or body-read failure.
    #[error("request to archive failed: {0}")]
    Transport(String),

    #[error("archive request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid archive url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to read archive file: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ArchiveError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
