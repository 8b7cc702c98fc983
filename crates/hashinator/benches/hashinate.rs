use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashinator::{Hashinator, PartitionCount, PartitionKey, ReferenceHashinator, XxHashinator};

fn bench_integer_keys(c: &mut Criterion) {
    let count = PartitionCount::new(1000).unwrap();
    let key = PartitionKey::BigInt(Some(-4_611_686_018_427_387_904));

    let mut group = c.benchmark_group("integer");
    group.bench_function("xxhashinator", |b| {
        b.iter(|| XxHashinator.hashinate(black_box(&key), count))
    });
    group.bench_function("reference", |b| {
        b.iter(|| ReferenceHashinator.hashinate(black_box(&key), count))
    });
    group.finish();
}

fn bench_string_keys(c: &mut Criterion) {
    let count = PartitionCount::new(1000).unwrap();

    let mut group = c.benchmark_group("string");
    for len in [8usize, 64, 1024] {
        let key = PartitionKey::varchar("k".repeat(len));
        group.bench_with_input(BenchmarkId::new("xxhashinator", len), &key, |b, key| {
            b.iter(|| XxHashinator.hashinate(black_box(key), count))
        });
        group.bench_with_input(BenchmarkId::new("reference", len), &key, |b, key| {
            b.iter(|| ReferenceHashinator.hashinate(black_box(key), count))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_integer_keys, bench_string_keys);
criterion_main!(benches);
