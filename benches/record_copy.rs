use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datamap_bench::{
    arraycopy, bench_iteration, build_records, copy_buffers,
    constants::{DEFAULT_BUFFER_SIZE, DEFAULT_INT_VALUE},
    BenchState, FillPattern,
};

/// The full operation: 32 KiB copy plus Foo/Bar construction, average ns/op
fn bench_full_iteration(c: &mut Criterion) {
    let mut state = BenchState::default();
    c.bench_function("copy_and_build_records", |b| {
        b.iter(|| black_box(bench_iteration(&mut state, DEFAULT_INT_VALUE).unwrap()))
    });
}

/// Copy alone across buffer sizes, reported as byte throughput
fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("arraycopy");

    for size in [1024, 8 * 1024, DEFAULT_BUFFER_SIZE, 256 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("full_buffer", size), &size, |b, &size| {
            let mut state = BenchState::with_fill(size, FillPattern::Random);
            b.iter(|| copy_buffers(black_box(&mut state)).unwrap())
        });
    }

    // Same bytes, unaligned offsets
    group.throughput(Throughput::Bytes((DEFAULT_BUFFER_SIZE - 7) as u64));
    group.bench_function("offset_3_to_4", |b| {
        let state = BenchState::with_fill(DEFAULT_BUFFER_SIZE, FillPattern::Random);
        let mut target = vec![0u8; DEFAULT_BUFFER_SIZE];
        b.iter(|| {
            arraycopy(
                black_box(&state.source),
                3,
                black_box(&mut target),
                4,
                DEFAULT_BUFFER_SIZE - 7,
            )
            .unwrap()
        })
    });

    group.finish();
}

/// Record construction alone
fn bench_records(c: &mut Criterion) {
    c.bench_function("build_records", |b| {
        b.iter(|| black_box(build_records(black_box(DEFAULT_INT_VALUE)).unwrap()))
    });
}

criterion_group!(benches, bench_full_iteration, bench_copy, bench_records);
criterion_main!(benches);
