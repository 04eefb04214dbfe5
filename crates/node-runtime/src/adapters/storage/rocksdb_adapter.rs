//! # RocksDB Storage Adapter
//!
//! Production implementation of the restriction subsystem's `KeyValueStore`.
//!
//! ## Features
//!
//! - Atomic batch writes (WriteBatch) for the dual temporary index
//! - Forward prefix scans and reverse "last key under prefix" seeks
//! - Snappy compression
//! - Bloom filters for point lookups
//! - Optional fsync on every write
//!
//! All restriction namespaces share the default column family; they are
//! separated by the one-byte prefixes in `qc_18_address_restriction::domain::keys`.

use qc_18_address_restriction::domain::keys::prefix_successor;
use qc_18_address_restriction::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use qc_18_address_restriction::KVStoreError;
use rocksdb::{Direction, ErrorKind, IteratorMode, Options, WriteBatch, WriteOptions, DB};
use std::path::PathBuf;
use tracing::info;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: PathBuf,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/restriction"),
            block_cache_size: 64 * 1024 * 1024,  // 64MB
            write_buffer_size: 16 * 1024 * 1024, // 16MB
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,  // 8MB
            write_buffer_size: 4 * 1024 * 1024, // 4MB
            sync_writes: false,
        }
    }
}

fn store_error(op: &str, e: rocksdb::Error) -> KVStoreError {
    classify_error(op, e.kind(), &e.to_string())
}

/// Checksum and format failures surface as corruption, everything else as I/O.
fn classify_error(op: &str, kind: ErrorKind, detail: &str) -> KVStoreError {
    let message = format!("RocksDB {op} failed: {detail}");
    match kind {
        ErrorKind::Corruption => KVStoreError::CorruptionError { message },
        _ => KVStoreError::IOError { message },
    }
}

/// RocksDB-backed key-value store
pub struct RocksDbStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path).map_err(|e| store_error("open", e))?;
        info!(path = %config.path.display(), sync = config.sync_writes, "RocksDB store opened");

        Ok(Self { db, config })
    }

    fn write_opts(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.db.get(key).map_err(|e| store_error("get", e))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .put_opt(key, value, &self.write_opts())
            .map_err(|e| store_error("put", e))
    }

    fn delete(&self, key: &[u8]) -> Result<(), KVStoreError> {
        self.db
            .delete_opt(key, &self.write_opts())
            .map_err(|e| store_error("delete", e))
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => batch.put(&key, &value),
                BatchOperation::Delete { key } => batch.delete(&key),
            }
        }
        self.db
            .write_opt(batch, &self.write_opts())
            .map_err(|e| store_error("batch write", e))
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.db
            .get_pinned(key)
            .map(|v| v.is_some())
            .map_err(|e| store_error("exists check", e))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let mut results = Vec::new();
        for item in self.db.iterator(IteratorMode::From(prefix, Direction::Forward)) {
            let (key, value) = item.map_err(|e| store_error("scan", e))?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }
        Ok(results)
    }

    fn last_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        // Reverse seek lands on the last key <= the prefix successor; that
        // may be the successor itself, so look at up to two keys
        let end = prefix_successor(prefix);
        let (mode, limit) = match &end {
            Some(end) => (IteratorMode::From(end, Direction::Reverse), 2),
            None => (IteratorMode::End, 1),
        };

        self.db
            .iterator(mode)
            .take(limit)
            .find_map(|item| match item {
                Ok((key, value)) if key.starts_with(prefix) => {
                    Some(Ok((key.to_vec(), value.to_vec())))
                }
                Ok(_) => None,
                Err(e) => Some(Err(store_error("reverse seek", e))),
            })
            .transpose()
    }
}
