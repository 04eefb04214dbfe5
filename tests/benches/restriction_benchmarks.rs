//! # Address Restriction Benchmarks
//!
//! | Operation | Claim | Target |
//! |-----------|-------|--------|
//! | `is_restricted` | Independent of open batch count | < 10μs |
//! | `resolve_batch` | Linear in the batch's own entries | < 1ms per 100 entries |

use criterion::{criterion_group, criterion_main};
use qc_tests::benchmarks::qc_18_address_restriction::{bench_is_restricted, bench_resolve_batch};

criterion_group!(benches, bench_is_restricted, bench_resolve_batch);
criterion_main!(benches);
