//! Kernel and fan-out benchmarks
//!
//! Measures one kernel iteration batch in isolation and the fixed cost of
//! spawning and joining worker threads.

use std::num::NonZeroUsize;

use cpubm::harness::run_replicated;
use cpubm::kernels::KernelKind;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");

    for iterations in [1_000u64, 100_000] {
        group.throughput(Throughput::Elements(iterations * 30));
        for kind in [KernelKind::Integer, KernelKind::FloatingPoint] {
            group.bench_with_input(
                BenchmarkId::new(kind.label(), iterations),
                &iterations,
                |b, &iters| b.iter(|| kind.run(black_box(iters))),
            );
        }
    }

    group.finish();
}

fn bench_fan_out_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out_overhead");

    for threads in [1usize, 2, 4, 8] {
        let n = NonZeroUsize::new(threads).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), &n, |b, &n| {
            b.iter(|| run_replicated(n, || {}).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kernels, bench_fan_out_overhead);
criterion_main!(benches);
