//! Micro-operation benchmarks for the byte-budgeted LRU cache.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency (nanoseconds) for get, add, and the
//! eviction path under identical conditions.

use std::hint::black_box;
use std::time::Instant;

use bytecache::lru::ByteLruCache;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const RESIDENT: usize = 16_384;
const VALUE_BYTES: usize = 64;
const OPS: u64 = 100_000;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key-{i:08}")).collect()
}

/// Budget sized so `RESIDENT` entries fit exactly.
fn resident_budget(keys: &[String]) -> u64 {
    keys.iter().map(|k| (k.len() + VALUE_BYTES) as u64).sum()
}

fn warm_cache(keys: &[String]) -> ByteLruCache<Vec<u8>> {
    let mut cache = ByteLruCache::new(resident_budget(keys));
    for key in keys {
        cache.add(key.clone(), vec![0u8; VALUE_BYTES]);
    }
    cache
}

// ============================================================================
// Get Hit Latency (ns/op)
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("byte_lru", |b| {
        b.iter_custom(|iters| {
            let key_set = keys(RESIDENT);
            let mut cache = warm_cache(&key_set);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = &key_set[(i as usize) % RESIDENT];
                    black_box(cache.get(key));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Add Latency: update vs miss-with-eviction (ns/op)
// ============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_ns");
    group.throughput(Throughput::Elements(OPS));

    // Overwrite of resident keys: the in-place update path.
    group.bench_function("update_in_place", |b| {
        b.iter_custom(|iters| {
            let key_set = keys(RESIDENT);
            let mut cache = warm_cache(&key_set);
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS {
                    let key = key_set[(i as usize) % RESIDENT].clone();
                    black_box(cache.add(key, vec![0u8; VALUE_BYTES]));
                }
            }
            start.elapsed()
        })
    });

    // Fresh keys against a full cache: every add evicts one tail entry.
    group.bench_function("insert_with_eviction", |b| {
        b.iter_custom(|iters| {
            let key_set = keys(RESIDENT);
            let mut cache = warm_cache(&key_set);
            let start = Instant::now();
            let mut serial = 0u64;
            for _ in 0..iters {
                for _ in 0..OPS {
                    serial += 1;
                    black_box(cache.add(format!("new-{serial:012}"), vec![0u8; VALUE_BYTES]));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Mixed Workload (ns/op)
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ns");
    group.throughput(Throughput::Elements(OPS));

    // 80% gets / 20% adds over a key space twice the resident set.
    group.bench_function("read_heavy", |b| {
        b.iter_custom(|iters| {
            let key_set = keys(RESIDENT * 2);
            let mut cache = warm_cache(&key_set[..RESIDENT]);
            let mut rng = StdRng::seed_from_u64(7);
            let start = Instant::now();
            for _ in 0..iters {
                for _ in 0..OPS {
                    let key = &key_set[rng.gen_range(0..key_set.len())];
                    if rng.gen_range(0..5) == 0 {
                        black_box(cache.add(key.clone(), vec![0u8; VALUE_BYTES]));
                    } else {
                        black_box(cache.get(key));
                    }
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_add, bench_mixed);
criterion_main!(benches);
