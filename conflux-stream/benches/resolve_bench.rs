// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{MaxParallel, Resolution};
use conflux_stream::{ResolveExt, ResolveOptions};
use criterion::{BenchmarkId, Criterion, Throughput};
use futures::executor::block_on;
use futures::stream::{self, StreamExt};
use std::convert::Infallible;
use std::hint::black_box;
use std::time::Duration;
use tokio::runtime::Builder;

fn parallelism(label: &str) -> MaxParallel {
    match label {
        "sequential" => MaxParallel::sequential(),
        "unbounded" => MaxParallel::unbounded(),
        _ => MaxParallel::limited(16).unwrap(),
    }
}

/// Bookkeeping cost alone: every resolution is ready on creation.
pub fn bench_resolve_immediate(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_immediate");
    let sizes = [100usize, 10_000usize];
    let parallelisms = ["sequential", "limited16", "unbounded"];

    for &size in &sizes {
        for &label in &parallelisms {
            for &maintain_order in &[true, false] {
                let id = BenchmarkId::from_parameter(format!(
                    "n{}_{}_{}",
                    size,
                    label,
                    if maintain_order { "ordered" } else { "unordered" }
                ));
                group.throughput(Throughput::Elements(size as u64));
                group.bench_with_input(id, &size, |bencher, &size| {
                    bencher.iter(|| {
                        let options = ResolveOptions::new()
                            .max_parallel(parallelism(label))
                            .maintain_order(maintain_order)
                            .resolver(|n: usize| Resolution::<_, Infallible>::value(n + 1));
                        let resolved = stream::iter(0..size).resolve(options).unwrap();
                        let count = block_on(resolved.count());
                        black_box(count);
                    });
                });
            }
        }
    }

    group.finish();
}

/// Reversed completion order, which is the worst case for the order buffer.
pub fn bench_resolve_out_of_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_out_of_order");
    let size = 1_000usize;

    for &maintain_order in &[true, false] {
        let label = if maintain_order { "ordered" } else { "unordered" };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &size, |bencher, &size| {
            bencher.iter(|| {
                // Paused runtime: timers fire instantly, only operator cost is measured
                let rt = Builder::new_current_thread()
                    .enable_time()
                    .start_paused(true)
                    .build()
                    .unwrap();

                rt.block_on(async {
                    let options = ResolveOptions::new()
                        .max_parallel(MaxParallel::unbounded())
                        .maintain_order(maintain_order)
                        .resolver(move |n: usize| async move {
                            tokio::time::sleep(Duration::from_micros((size - n) as u64)).await;
                            Ok::<_, Infallible>(n)
                        });
                    let outputs: Vec<usize> =
                        stream::iter(0..size).resolve(options).unwrap().collect().await;
                    black_box(outputs);
                });
            });
        });
    }

    group.finish();
}
