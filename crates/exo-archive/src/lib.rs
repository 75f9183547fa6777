//! exo-archive: archive sources and the batch ingestor for exoscope.
//!
//! A source performs the single read of the upstream planet array
//! ([`HttpSource`] against the archive proxy, [`FileSource`] for a saved
//! dump). The [`Ingestor`] then normalises the records in fixed-size batches,
//! yielding to the runtime between batches and reporting progress to an
//! [`IngestObserver`].

pub mod error;
pub mod file;
pub mod http;
pub mod ingestor;
pub mod source;

pub use error::ArchiveError;
pub use file::FileSource;
pub use http::HttpSource;
pub use ingestor::{Callbacks, IngestObserver, Ingestor, Scheduler, YieldPoint, DEFAULT_BATCH_SIZE};
pub use source::{AnySource, ArchiveSource};
