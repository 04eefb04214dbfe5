//! # Address Restriction Benchmarks
//!
//! Criterion workloads driven from `benches/restriction_benchmarks.rs`.

pub mod qc_18_address_restriction;
