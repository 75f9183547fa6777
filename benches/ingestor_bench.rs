//! Ingestor benchmarks: time from `fetch` to `on_complete` for an in-memory
//! source.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `ingest/batch_size` | A 10 000-record run at batch sizes 10, 100 and 1 000 |
//! | `ingest/records` | Default batch size over 1 000, 10 000 and 50 000 records |
//!
//! The idle scheduler is used throughout; the frame scheduler would only
//! measure its own sleeps.
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench ingestor_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use exo_archive::{Callbacks, Ingestor, Scheduler};
use exo_core::{Planet, RawRecord};
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::LocalSet;

fn records(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            RawRecord::new()
                .with("pl_name", format!("Ingest-{} {}", i / 3, i % 3))
                .with("hostname", format!("Ingest-{}", i / 3))
                .with("pl_rade", 0.8 + (i % 12) as f64)
                .with("pl_dens", (i % 7) as f64)
                .with("sy_dist", 3.0 + i as f64 * 0.01)
        })
        .collect()
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// One full run; resolves to the number of planets delivered.
async fn ingest(source: Vec<RawRecord>, batch_size: usize) -> usize {
    LocalSet::new()
        .run_until(async move {
            let (tx, rx) = oneshot::channel();
            let mut tx = Some(tx);
            let mut ingestor = Ingestor::new(source, Scheduler::Idle).with_batch_size(batch_size);
            ingestor.fetch(Callbacks::new(
                |_: &[Planet], _: &[Planet]| {},
                move |planets: Vec<Planet>| {
                    if let Some(tx) = tx.take() {
                        let _ = tx.send(planets.len());
                    }
                },
                |error| panic!("in-memory ingestion failed: {error}"),
            ));
            rx.await.unwrap()
        })
        .await
}

fn bench_batch_size(c: &mut Criterion) {
    let rt = runtime();
    let source = records(10_000);
    let mut group = c.benchmark_group("ingest/batch_size");
    group.throughput(Throughput::Elements(source.len() as u64));

    for batch_size in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &size| {
            b.to_async(&rt).iter(|| ingest(source.clone(), size))
        });
    }

    group.finish();
}

fn bench_records(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("ingest/records");
    group.sample_size(20);

    for n in [1_000usize, 10_000, 50_000] {
        let source = records(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.to_async(&rt).iter(|| ingest(source.clone(), exo_archive::DEFAULT_BATCH_SIZE))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_batch_size, bench_records);
criterion_main!(benches);
