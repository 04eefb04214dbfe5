//! # Adapter Implementations
//!
//! Host-side implementations around the restriction subsystem:
//!
//! - `storage` - `KeyValueStore` backends (in-memory, RocksDB)
//! - `ledger` - balance ledger running the pre-transfer hook chain
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   OUTER LAYER (Adapters)                    │
//! │        NodeStore, RocksDbStore, InMemoryLedger              │
//! │                        ↑ implements ↑                       │
//! │                    MIDDLE LAYER (Ports)                     │
//! │        KeyValueStore, PreTransferHook (qc-18)               │
//! │                          ↑ uses ↑                           │
//! │                    INNER LAYER (Domain)                     │
//! │        RestrictionEngine, TransferGuard                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod ledger;
pub mod storage;

pub use ledger::{InMemoryLedger, LedgerError};
pub use storage::*;
