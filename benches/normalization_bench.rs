//! Normalizer throughput benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `normalize/complete` | Records carrying every upstream key |
//! | `normalize/sparse` | Records with only identity fields (all defaults) |
//! | `normalize/strings` | Numeric fields sent as strings |
//! | `classify` | Classification alone, density and radius paths |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench normalization_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use exo_core::normalizer::classify;
use exo_core::{normalize, RawRecord};
use serde_json::json;
use std::hint::black_box;

fn complete(i: usize) -> RawRecord {
    serde_json::from_value(json!({
        "pl_name": format!("Bench-{i} b"), "hostname": format!("Bench-{i}"),
        "pl_rade": 0.5 + (i % 30) as f64, "pl_bmasse": 3.0, "pl_eqt": 400, "pl_dens": 1.0 + (i % 6) as f64,
        "sy_dist": 42.0, "pl_orbper": 12.5, "pl_orbsmax": 0.1, "pl_orbeccen": 0.02, "pl_insol": 80.0,
        "pl_orbincl": 89.1, "pl_orblper": 90.0, "st_teff": 5400, "st_rad": 0.9, "st_mass": 0.95,
        "st_lum": -0.1, "st_spectype": "K1 V", "st_age": 3.3, "discoverymethod": "Transit",
        "disc_facility": "K2", "disc_year": 2016, "sy_snum": 1, "sy_pnum": 2
    }))
    .unwrap()
}

fn sparse(i: usize) -> RawRecord {
    RawRecord::new().with("pl_name", format!("Bench-{i} b")).with("hostname", "Bench")
}

fn stringly(i: usize) -> RawRecord {
    sparse(i)
        .with("pl_rade", format!("{}", 1 + i % 20))
        .with("pl_eqt", "288.5")
        .with("sy_dist", " 10.2 ")
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let shapes: [(&str, fn(usize) -> RawRecord); 3] =
        [("complete", complete), ("sparse", sparse), ("strings", stringly)];

    for (name, make) in shapes {
        for n in [100usize, 1_000] {
            let records: Vec<RawRecord> = (0..n).map(make).collect();
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(BenchmarkId::new(name, n), &records, |b, records| {
                b.iter_batched(
                    || records.clone(),
                    |records| records.into_iter().map(normalize).collect::<Vec<_>>(),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let inputs: Vec<(Option<f64>, f64)> = (0..1_000)
        .map(|i| {
            let density = (i % 3 != 0).then(|| (i % 60) as f64 / 10.0);
            (density, 0.1 + (i % 150) as f64 / 10.0)
        })
        .collect();

    c.bench_function("classify", |b| {
        b.iter(|| {
            for &(density, radius) in &inputs {
                black_box(classify(black_box(density), black_box(radius)));
            }
        })
    });
}

criterion_group!(benches, bench_normalize, bench_classify);
criterion_main!(benches);
