// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{criterion_group, criterion_main};

mod resolve_bench;

use channel_bench::bench_resolve_channel;
use resolve_bench::{bench_resolve_immediate, bench_resolve_out_of_order};

criterion_group!(
    benches,
    bench_resolve_immediate,
    bench_resolve_out_of_order,
    bench_resolve_channel
);
criterion_main!(benches);
