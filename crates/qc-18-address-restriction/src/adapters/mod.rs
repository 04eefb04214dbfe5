//! Adapters for Address Restriction
//!
//! In-process implementations of the outbound ports. The RocksDB store lives
//! in node-runtime behind the `rocksdb` feature.

pub mod governance;
pub mod memory_store;

pub use governance::InMemoryGovernance;
pub use memory_store::InMemoryKVStore;
