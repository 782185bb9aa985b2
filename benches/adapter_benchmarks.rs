//! Adapter benchmarks over the in-memory backend

use criterion::{criterion_group, criterion_main, Criterion};
use redis_resource::prelude::*;
use std::hint::black_box;

fn bench_storage_keys(c: &mut Criterion) {
    c.bench_function("storage_key_record", |b| {
        b.iter(|| StorageKey::record(black_box("basket"), black_box("42")).to_string())
    });
}

fn bench_create_then_get(c: &mut Criterion) {
    let adapter = ResourceAdapter::with_collection(MemoryBackend::new(), "bench").unwrap();
    let mut n = 0u64;
    c.bench_function("create_then_get", |b| {
        b.iter(|| {
            n += 1;
            let id = n.to_string();
            let bundle = Bundle::new()
                .with_field("item", "apple")
                .with_field("qty", "3");
            adapter.create(bundle, Some(&id)).unwrap();
            black_box(adapter.get(&id).unwrap())
        })
    });
}

fn bench_list(c: &mut Criterion) {
    let adapter = ResourceAdapter::with_collection(MemoryBackend::new(), "bench").unwrap();
    for i in 0..100 {
        let bundle = Bundle::new()
            .with_field("item", "apple")
            .with_field("qty", i.to_string());
        adapter.create(bundle, Some(&i.to_string())).unwrap();
    }
    c.bench_function("list_100_records", |b| {
        b.iter(|| black_box(adapter.list().unwrap()))
    });
}

criterion_group!(benches, bench_storage_keys, bench_create_then_get, bench_list);
criterion_main!(benches);
