use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use filecache::FileCache;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_1kb_hit", |b| {
        let mut cache = FileCache::new(1000, 0).unwrap();
        let data = vec![b'x'; 1024];

        let keys: Vec<String> = (0..100).map(|i| format!("/page{}.html", i)).collect();
        for key in &keys {
            cache.put(key, "text/html", &data).unwrap();
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(&keys[counter % 100]).map(|view| view.len()));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_put_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_1kb_evicting", |b| {
        let mut cache = FileCache::new(100, 0).unwrap();
        let data = vec![b'x'; 1024];

        let mut counter = 0u64;
        b.iter(|| {
            let key = format!("/page{}.html", counter);
            black_box(cache.put(&key, "text/html", &data).ok());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_get_50_put", |b| {
        let mut cache = FileCache::new(100, 0).unwrap();
        let data = vec![b'x'; 1024];

        let keys: Vec<String> = (0..200).map(|i| format!("/page{}.html", i)).collect();
        for key in keys.iter().take(100) {
            cache.put(key, "text/html", &data).unwrap();
        }

        let mut counter = 0usize;
        b.iter(|| {
            let key = &keys[counter % 200];
            if cache.get(key).is_none() {
                black_box(cache.put(key, "text/html", &data).ok());
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_put_with_eviction,
    bench_mixed_50_50
);
criterion_main!(benches);
