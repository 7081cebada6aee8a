//! Dispatch overhead benchmarks
//!
//! Compares the generic `invoke` path against calling the library routine
//! directly, so the cost of validation and marshaling stays visible.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use powhash::{Dispatcher, Registry, Value};
use powhash_algorithms::algorithms;

fn benchmark_dispatch_overhead(c: &mut Criterion) {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let header = [0x42u8; 80];

    let mut group = c.benchmark_group("dispatch_overhead");
    group.throughput(Throughput::Bytes(header.len() as u64));

    group.bench_function("keccak_direct", |b| {
        b.iter(|| {
            let mut out = [0u8; 32];
            algorithms::keccak_hash(black_box(&header), &mut out);
            black_box(out);
        })
    });

    group.bench_function("keccak_invoke", |b| {
        b.iter(|| {
            let result = dispatcher
                .invoke("keccak", &[Value::Bytes(black_box(&header))])
                .unwrap();
            black_box(result);
        })
    });

    group.bench_function("validate_only", |b| {
        b.iter(|| {
            let request = dispatcher
                .validate("neoscrypt", &[Value::Bytes(black_box(&header)), 0u32.into()])
                .unwrap();
            black_box(request);
        })
    });

    group.finish();
}

fn benchmark_algorithms(c: &mut Criterion) {
    let registry = Registry::new();
    let dispatcher = Dispatcher::new(&registry);
    let header = [0x42u8; 80];

    let mut group = c.benchmark_group("algorithms");
    for id in ["quark", "x11", "x17", "blake2s", "lyra2re2"] {
        group.bench_with_input(BenchmarkId::new("invoke", id), &header, |b, header| {
            b.iter(|| black_box(dispatcher.invoke(id, &[Value::Bytes(header)]).unwrap()))
        });
    }

    group.sample_size(10);
    group.bench_function("scryptn_9", |b| {
        b.iter(|| black_box(dispatcher.scryptn(&header, 9).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, benchmark_dispatch_overhead, benchmark_algorithms);
criterion_main!(benches);
