//! Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the restriction engine requires the host to provide.
//! Events go out through `shared_bus::EventPublisher`.

use crate::domain::entities::BatchInfo;
use crate::domain::errors::{GovernanceError, KVStoreError};
use shared_types::{BatchId, Coins};

/// Key/value pairs returned by a scan, in ascending key order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for the durable key-value store.
///
/// Production: `RocksDbStore` (node-runtime/adapters/storage/rocksdb_adapter.rs)
/// Testing: `InMemoryKVStore` (adapters/memory_store.rs)
///
/// Implementations synchronize internally; all methods take `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// All entries whose key starts with `prefix`, ascending by key.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;

    /// The entry with the greatest key starting with `prefix`.
    ///
    /// Ordered stores should override this with a reverse seek.
    fn last_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(self
            .prefix_scan(prefix)?
            .into_iter()
            .max_by(|a, b| a.0.cmp(&b.0)))
    }
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Governance lifecycle (external collaborator).
///
/// Supplies batch metadata. The lifecycle owns voting, tallying and deposit
/// escrow; this subsystem only reads.
pub trait GovernanceLifecycle: Send + Sync {
    /// Look up a batch. `Ok(None)` if it does not exist (or no longer does).
    fn batch(&self, batch_id: BatchId) -> Result<Option<BatchInfo>, GovernanceError>;

    /// Current deposit of a batch.
    fn batch_deposit(&self, batch_id: BatchId) -> Result<Coins, GovernanceError> {
        self.batch(batch_id)?
            .map(|b| b.deposit)
            .ok_or(GovernanceError::UnknownBatch { batch_id })
    }
}

/// Mock implementations for testing
#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::adapters::InMemoryKVStore;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store wrapper whose reads and writes can be switched to fail.
    #[derive(Default)]
    pub struct FaultyStore {
        inner: InMemoryKVStore,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl FaultyStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        fn check(&self, flag: &AtomicBool) -> Result<(), KVStoreError> {
            if flag.load(Ordering::SeqCst) {
                return Err(KVStoreError::IOError {
                    message: "injected failure".into(),
                });
            }
            Ok(())
        }
    }

    impl KeyValueStore for FaultyStore {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
            self.check(&self.fail_reads)?;
            self.inner.get(key)
        }

        fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
            self.check(&self.fail_writes)?;
            self.inner.put(key, value)
        }

        fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
            self.check(&self.fail_writes)?;
            self.inner.delete(key)
        }

        fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
            self.check(&self.fail_writes)?;
            self.inner.atomic_batch_write(operations)
        }

        fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
            self.check(&self.fail_reads)?;
            self.inner.prefix_scan(prefix)
        }
    }

    /// Store whose `last_with_prefix` returns the first match, not the last.
    #[derive(Default)]
    pub struct FirstMatchStore {
        inner: InMemoryKVStore,
    }

    impl KeyValueStore for FirstMatchStore {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
            self.inner.get(key)
        }

        fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
            self.inner.put(key, value)
        }

        fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
            self.inner.delete(key)
        }

        fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
            self.inner.atomic_batch_write(operations)
        }

        fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
            self.inner.prefix_scan(prefix)
        }

        fn last_with_prefix(
            &self,
            prefix: &[u8],
        ) -> Result<Option<(Vec<u8>, Vec<u8>)>, KVStoreError> {
            Ok(self.inner.prefix_scan(prefix)?.into_iter().next())
        }
    }
}
