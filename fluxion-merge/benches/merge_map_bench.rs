// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use fluxion_core::{of, FnObserver, FluxionError, ObservableExt};
use fluxion_merge::{Concurrency, MergeExt};
use std::hint::black_box;

fn consume(values: Vec<Vec<u8>>, concurrency: Concurrency) {
    of(values)
        .merge_map(|payload: Vec<u8>, _| of(vec![payload]), concurrency)
        .subscribe_with(FnObserver::new(
            |payload: Vec<u8>| {
                black_box(payload);
            },
            |_error: FluxionError| {},
            || {},
        ));
}

pub fn bench_merge_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_map");
    let sizes = [1000usize, 10_000usize];
    let payload_sizes = [0usize, 128usize];
    let limits = [
        ("unbounded", Concurrency::Unbounded),
        ("serial", Concurrency::SERIAL),
    ];

    for &size in &sizes {
        for &payload_size in &payload_sizes {
            for &(label, concurrency) in &limits {
                let id = BenchmarkId::from_parameter(format!(
                    "merge_map_{label}_m{size}_p{payload_size}"
                ));
                group.throughput(Throughput::Elements(size as u64));
                group.bench_with_input(id, &(size, payload_size), |bencher, &(size, payload_size)| {
                    bencher.iter(|| {
                        let values = vec![vec![0u8; payload_size]; size];
                        consume(values, concurrency);
                    })
                });
            }
        }
    }

    group.finish();
}
