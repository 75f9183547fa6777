//! Batch ingestor: one fetch, then normalisation in fixed-size batches.
//!
//! ```text
//! fetch(observer)
//!   └─ cancel_processing()            // previous run never calls back again
//!   └─ spawn_local(run)
//!        ├─ source.fetch_records()    // single read of the whole array
//!        ├─ batch 1 → on_batch
//!        ├─ yield_now()
//!        ├─ batch 2 → on_batch
//!        ├─ ...
//!        └─ on_complete(all)
//! ```
//!
//! Runs live on the current thread's [`tokio::task::LocalSet`], so observers
//! may hold `Rc`/`RefCell` state. Every run owns a [`CancellationToken`] that
//! is checked before each batch and before each callback; cancelled runs are
//! also aborted outright.

use crate::{error::ArchiveError, source::ArchiveSource};
use exo_core::config::{IngestConfig, SchedulerKind};
use exo_core::{normalize, Planet};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_BATCH_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Yield points
// ---------------------------------------------------------------------------

/// What the ingestor awaits between batches.
pub trait YieldPoint {
    fn yield_now(&self) -> impl Future<Output = ()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduler {
    /// Resume once other ready tasks have had a turn.
    Idle,
    /// Resume after one frame.
    Frame(Duration),
}

impl Scheduler {
    pub fn from_config(config: &IngestConfig) -> Self {
        match config.scheduler {
            SchedulerKind::Idle => Scheduler::Idle,
            SchedulerKind::Frame => Scheduler::Frame(Duration::from_millis(config.frame_ms)),
        }
    }
}

impl YieldPoint for Scheduler {
    async fn yield_now(&self) {
        match self {
            Scheduler::Idle => tokio::task::yield_now().await,
            Scheduler::Frame(frame) => tokio::time::sleep(*frame).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// Receives the progress of one ingestion run.
pub trait IngestObserver {
    /// `batch` is the newly normalised slice; `processed` is everything
    /// normalised so far in this run, `batch` included.
    fn on_batch(&mut self, batch: &[Planet], processed: &[Planet]);
    fn on_complete(&mut self, planets: Vec<Planet>);
    fn on_error(&mut self, error: ArchiveError);
}

/// Closure-backed [`IngestObserver`].
pub struct Callbacks<B, C, E> {
    on_batch: B,
    on_complete: C,
    on_error: E,
}

impl<B, C, E> Callbacks<B, C, E>
where
    B: FnMut(&[Planet], &[Planet]),
    C: FnMut(Vec<Planet>),
    E: FnMut(ArchiveError),
{
    pub fn new(on_batch: B, on_complete: C, on_error: E) -> Self {
        Self { on_batch, on_complete, on_error }
    }
}

impl<B, C, E> IngestObserver for Callbacks<B, C, E>
where
    B: FnMut(&[Planet], &[Planet]),
    C: FnMut(Vec<Planet>),
    E: FnMut(ArchiveError),
{
    fn on_batch(&mut self, batch: &[Planet], processed: &[Planet]) {
        (self.on_batch)(batch, processed)
    }

    fn on_complete(&mut self, planets: Vec<Planet>) {
        (self.on_complete)(planets)
    }

    fn on_error(&mut self, error: ArchiveError) {
        (self.on_error)(error)
    }
}

// ---------------------------------------------------------------------------
// Ingestor
// ---------------------------------------------------------------------------

struct PendingRun {
    id: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct Ingestor<S, Y = Scheduler> {
    source: Rc<S>,
    scheduler: Y,
    batch_size: usize,
    runs: Vec<PendingRun>,
    next_id: u64,
}

impl<S: ArchiveSource + 'static> Ingestor<S, Scheduler> {
    pub fn from_config(source: S, config: &IngestConfig) -> Self {
        Ingestor::new(source, Scheduler::from_config(config)).with_batch_size(config.batch_size)
    }
}

impl<S, Y> Ingestor<S, Y>
where
    S: ArchiveSource + 'static,
    Y: YieldPoint + Clone + 'static,
{
    pub fn new(source: S, scheduler: Y) -> Self {
        Self {
            source: Rc::new(source),
            scheduler,
            batch_size: DEFAULT_BATCH_SIZE,
            runs: Vec::new(),
            next_id: 0,
        }
    }

    /// Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Start a run, cancelling any run still in flight. Returns the run id.
    ///
    /// Must be called from within a [`tokio::task::LocalSet`].
    pub fn fetch<O>(&mut self, observer: O) -> u64
    where
        O: IngestObserver + 'static,
    {
        self.cancel_processing();

        self.next_id += 1;
        let id = self.next_id;
        let token = CancellationToken::new();
        let handle = tokio::task::spawn_local(run(
            id,
            self.source.clone(),
            self.scheduler.clone(),
            self.batch_size,
            token.clone(),
            observer,
        ));
        self.runs.push(PendingRun { id, token, handle });
        id
    }

    /// Cancel and forget every outstanding run.
    pub fn cancel_processing(&mut self) {
        for run in self.runs.drain(..) {
            if !run.handle.is_finished() {
                tracing::debug!(run = run.id, "cancelling ingestion run");
            }
            run.token.cancel();
            run.handle.abort();
        }
    }

    pub fn is_processing(&self) -> bool {
        self.runs.iter().any(|r| !r.handle.is_finished())
    }
}

impl<S, Y> Drop for Ingestor<S, Y> {
    fn drop(&mut self) {
        for run in self.runs.drain(..) {
            run.token.cancel();
            run.handle.abort();
        }
    }
}

async fn run<S, Y, O>(
    id: u64,
    source: Rc<S>,
    scheduler: Y,
    batch_size: usize,
    token: CancellationToken,
    mut observer: O,
) where
    S: ArchiveSource,
    Y: YieldPoint,
    O: IngestObserver,
{
    let fetched = tokio::select! {
        _ = token.cancelled() => return,
        fetched = source.fetch_records() => fetched,
    };

    let records = match fetched {
        Ok(records) => records,
        Err(e) => {
            if !token.is_cancelled() {
                tracing::warn!(run = id, error = %e, "ingestion failed");
                observer.on_error(e);
            }
            return;
        }
    };

    let total = records.len();
    let batches = total.div_ceil(batch_size);
    tracing::info!(run = id, records = total, batches, "ingestion started");

    let mut processed: Vec<Planet> = Vec::with_capacity(total);
    let mut remaining = records.into_iter();

    for n in 0..batches {
        if n > 0 {
            scheduler.yield_now().await;
        }
        if token.is_cancelled() {
            return;
        }

        let start = processed.len();
        processed.extend(remaining.by_ref().take(batch_size).map(normalize));

        if token.is_cancelled() {
            return;
        }
        observer.on_batch(&processed[start..], &processed);
        tracing::debug!(run = id, batch = n + 1, processed = processed.len(), "batch normalised");
    }

    if token.is_cancelled() {
        return;
    }
    tracing::info!(run = id, planets = processed.len(), "ingestion complete");
    observer.on_complete(processed);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
