//! # QC-18 Address Restriction Benchmarks
//!
//! Claims to validate:
//! - `is_restricted` is a point lookup plus one reverse seek, independent of
//!   how many batches target other addresses
//! - `resolve_batch` cost grows with the batch's own entries only
//!
//! Conditions:
//! - 10k permanently restricted addresses
//! - Hundreds of open batches per address

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;

use qc_18_address_restriction::{
    InMemoryKVStore, Params, RestrictionApi, RestrictionConfig, RestrictionEngine,
};
use shared_bus::InMemoryEventBus;
use shared_types::{Address, Coins};

fn engine() -> RestrictionEngine<InMemoryKVStore> {
    RestrictionEngine::new(
        Arc::new(InMemoryKVStore::new()),
        RestrictionConfig::default(),
        Arc::new(InMemoryEventBus::new()),
    )
}

fn random_address() -> Address {
    let bytes: [u8; 20] = rand::thread_rng().gen();
    Address::new(bytes.to_vec()).unwrap()
}

fn params() -> (Params, Coins) {
    let deposit = Coins::single(1, "stake");
    (Params::new(deposit.clone(), deposit.clone()), deposit)
}

/// Lookup latency with growing numbers of open batches on the same address.
pub fn bench_is_restricted(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-is-restricted");
    let (p, deposit) = params();

    for batches in [0u64, 10, 100, 1_000] {
        let engine = engine();
        let target = random_address();
        let population: Vec<Address> = (0..10_000).map(|_| random_address()).collect();
        engine.restrict(&population).unwrap();

        for batch in 1..=batches {
            let _ = if batch % 2 == 0 {
                engine.propose_restrict(batch, &[target.clone()], &deposit, &p)
            } else {
                engine.propose_unrestrict(batch, &[target.clone()], &deposit, &p)
            };
        }

        group.bench_with_input(BenchmarkId::new("open_batches", batches), &batches, |b, _| {
            b.iter(|| black_box(engine.is_restricted(&target).is_ok()))
        });
    }
    group.finish();
}

/// Cleanup cost by batch size.
pub fn bench_resolve_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-resolve-batch");
    let (p, deposit) = params();

    for size in [1usize, 10, 100, 1_000] {
        let addresses: Vec<Address> = (0..size).map(|_| random_address()).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("entries", size), &addresses, |b, addresses| {
            b.iter_batched(
                || {
                    let engine = engine();
                    let _ = engine.propose_restrict(1, addresses, &deposit, &p);
                    engine
                },
                |engine| black_box(engine.resolve_batch(1).unwrap()),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}
