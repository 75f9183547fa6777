//! Recording [`IngestObserver`] for ingestion harnesses.

use exo_archive::{ArchiveError, IngestObserver};
use exo_core::Planet;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum IngestEvent {
    Batch { len: usize, processed: usize },
    Complete(usize),
    Error(Option<u16>),
}

/// Records every callback into a shared log. Clones share the log, so keep
/// one clone and hand the other to the ingestor.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<IngestEvent>>>,
    planets: Rc<RefCell<Vec<Planet>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<IngestEvent> {
        self.events.borrow().clone()
    }

    pub fn planets(&self) -> Vec<Planet> {
        self.planets.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.events
            .borrow()
            .iter()
            .any(|e| matches!(e, IngestEvent::Complete(_) | IngestEvent::Error(_)))
    }

    /// Poll until a terminal event arrives. Panics after `limit`.
    pub async fn wait_finished(&self, limit: Duration) {
        let recorder = self.clone();
        tokio::time::timeout(limit, async move {
            while !recorder.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap_or_else(|_| panic!("ingestion did not finish within {limit:?}: {:?}", self.events()));
    }
}

impl IngestObserver for Recorder {
    fn on_batch(&mut self, batch: &[Planet], processed: &[Planet]) {
        self.events
            .borrow_mut()
            .push(IngestEvent::Batch { len: batch.len(), processed: processed.len() });
    }

    fn on_complete(&mut self, planets: Vec<Planet>) {
        self.events.borrow_mut().push(IngestEvent::Complete(planets.len()));
        *self.planets.borrow_mut() = planets;
    }

    fn on_error(&mut self, error: ArchiveError) {
        self.events.borrow_mut().push(IngestEvent::Error(error.status()));
    }
}
