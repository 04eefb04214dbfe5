//! # Storage Adapters
//!
//! Backends for the restriction subsystem's `KeyValueStore`.
//!
//! ## Usage
//!
//! Enable the `rocksdb` feature to persist state across restarts:
//!
//! ```toml
//! node-runtime = { path = "...", features = ["rocksdb"] }
//! ```
//!
//! Without it the node runs on `InMemoryKVStore` and genesis is re-applied
//! on every start.

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};

pub use qc_18_address_restriction::InMemoryKVStore;

use crate::container::config::StorageConfig;
use qc_18_address_restriction::{BatchOperation, KVStoreError, KeyValueStore, ScanResult};
use tracing::info;

/// The store selected by `StorageConfig` at startup.
pub enum NodeStore {
    Memory(InMemoryKVStore),
    #[cfg(feature = "rocksdb")]
    RocksDb(RocksDbStore),
}

impl NodeStore {
    /// Open the configured backend.
    pub fn open(config: &StorageConfig) -> Result<Self, KVStoreError> {
        #[cfg(feature = "rocksdb")]
        {
            if config.use_rocksdb {
                let path = config.data_dir.join("restriction");
                let store = RocksDbStore::open(RocksDbConfig {
                    path,
                    ..Default::default()
                })?;
                return Ok(Self::RocksDb(store));
            }
        }

        info!(requested_rocksdb = config.use_rocksdb, "Using in-memory restriction store");
        Ok(Self::Memory(InMemoryKVStore::new()))
    }

    /// Whether the store holds no restriction data at all.
    pub fn is_empty(&self) -> Result<bool, KVStoreError> {
        Ok(self.last_with_prefix(&[])?.is_none())
    }

    fn inner(&self) -> &dyn KeyValueStore {
        match self {
            Self::Memory(store) => store,
            #[cfg(feature = "rocksdb")]
            Self::RocksDb(store) => store,
        }
    }
}

impl KeyValueStore for NodeStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner().get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner().put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.inner().delete(key)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.inner().atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner().exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        self.inner().prefix_scan(prefix)
    }

    fn last_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        self.inner().last_with_prefix(prefix)
    }
}
