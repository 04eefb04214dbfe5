//! # Genesis Module
//!
//! Loads the node's genesis file and seeds initial state.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "restriction": {
//!     "params": { "immediate_restrict_min_deposit": "100stake", ... },
//!     "restricted_addresses": ["0x..."],
//!     "temporary_entries": []
//!   },
//!   "balances": [{ "address": "0x...", "coins": "1000stake" }]
//! }
//! ```
//!
//! ## Initialization Sequence
//!
//! 1. Validate the restriction section against the configured allow-list
//! 2. Import restriction state, only if the store holds nothing yet
//! 3. Credit initial balances (the ledger is always in-memory)

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use qc_18_address_restriction::{
    import_genesis, GenesisError, GenesisState, KVStoreError, RestrictionEngine,
};
use shared_types::{Address, Coins};

use crate::adapters::{InMemoryLedger, LedgerError, NodeStore};

/// Node genesis errors.
#[derive(Debug, Error)]
pub enum NodeGenesisError {
    /// Genesis file could not be read.
    #[error("Failed to read genesis file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Genesis JSON did not parse.
    #[error("Invalid genesis JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Restriction section rejected.
    #[error(transparent)]
    Restriction(#[from] GenesisError),

    /// Store emptiness check failed.
    #[error(transparent)]
    Store(#[from] KVStoreError),

    /// Initial balance could not be credited.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Initial balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub address: Address,
    pub coins: Coins,
}

/// Complete node genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeGenesis {
    pub restriction: GenesisState,
    pub balances: Vec<GenesisBalance>,
}

impl NodeGenesis {
    /// Read and parse a genesis file.
    pub fn load(path: &Path) -> Result<Self, NodeGenesisError> {
        let json = std::fs::read_to_string(path).map_err(|source| NodeGenesisError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Seed `engine` and `ledger`.
    ///
    /// Returns whether restriction state was imported; a store that already
    /// holds data is left untouched.
    pub fn apply(
        &self,
        store: &NodeStore,
        engine: &RestrictionEngine<NodeStore>,
        ledger: &InMemoryLedger,
    ) -> Result<bool, NodeGenesisError> {
        self.restriction.validate(engine.allow_list())?;

        let imported = if store.is_empty()? {
            import_genesis(engine, &self.restriction)?;
            true
        } else {
            info!("Restriction store already initialized, skipping genesis import");
            false
        };

        for balance in &self.balances {
            ledger.mint(&balance.address, &balance.coins)?;
        }

        info!(
            imported,
            balances = self.balances.len(),
            "Genesis applied"
        );
        Ok(imported)
    }
}
