//! # Node Configuration
//!
//! Runtime parameters for the restriction node, loaded from the environment.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_DATA_DIR` | `./data` | Storage directory |
//! | `QC_ROCKSDB` | `false` | Use RocksDB (needs the `rocksdb` feature) |
//! | `QC_GENESIS_PATH` | unset | Genesis JSON applied to an empty store |
//! | `QC_UNRESTRICTABLE` | empty | Comma-separated allow-listed addresses |
//! | `QC_AUTHORITY` | unset | Address allowed to update params |
//! | `QC_LOG_LEVEL`, `QC_JSON_LOGS` | | See `quantum-telemetry` |

use qc_18_address_restriction::RestrictionConfig;
use quantum_telemetry::TelemetryConfig;
use shared_types::{Address, TypeError};
use std::path::PathBuf;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Genesis file, applied only when the store is empty.
    pub genesis_path: Option<PathBuf>,
    /// Restriction engine configuration.
    pub restriction: RestrictionConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory for the RocksDB store.
    pub data_dir: PathBuf,
    /// Persist to RocksDB instead of memory.
    pub use_rocksdb: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            use_rocksdb: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An address in an environment variable failed to parse.
    #[error("Invalid address in {var}: {source}")]
    InvalidAddress {
        var: &'static str,
        #[source]
        source: TypeError,
    },

    /// RocksDB requested but not compiled in.
    #[error("QC_ROCKSDB is set but node-runtime was built without the `rocksdb` feature")]
    RocksDbUnavailable,
}

impl NodeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = NodeConfig {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Default::default()
        };

        if let Some(dir) = lookup("QC_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("QC_ROCKSDB") {
            config.storage.use_rocksdb = matches!(flag.to_lowercase().as_str(), "1" | "true");
        }
        config.genesis_path = lookup("QC_GENESIS_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(list) = lookup("QC_UNRESTRICTABLE") {
            config.restriction.unrestrictable_addresses =
                parse_address_list("QC_UNRESTRICTABLE", &list)?;
        }
        if let Some(authority) = lookup("QC_AUTHORITY") {
            let authority = authority
                .parse::<Address>()
                .map_err(|source| ConfigError::InvalidAddress {
                    var: "QC_AUTHORITY",
                    source,
                })?;
            config.restriction.authority = Some(authority);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations this build cannot serve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.use_rocksdb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::RocksDbUnavailable);
        }
        Ok(())
    }
}

fn parse_address_list(var: &'static str, list: &str) -> Result<Vec<Address>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Address>()
                .map_err(|source| ConfigError::InvalidAddress { var, source })
        })
        .collect()
}
