//! Error types for Address Restriction
//!
//! Allow-list violations and store failures abort the enclosing operation
//! immediately; nothing is retried locally.

use shared_types::{Address, BatchId, TypeError};
use thiserror::Error;

/// All errors that can occur in the restriction engine
#[derive(Debug, Error)]
pub enum RestrictionError {
    /// Attempt to restrict an address on the allow-list
    #[error("Address {address} is on the allow-list and cannot be restricted")]
    AllowListedAddress { address: Address },

    /// Underlying durable store failed
    #[error("Store error: {0}")]
    Store(#[from] KVStoreError),

    /// A stored key or value could not be decoded
    #[error("Corrupt store entry: {0}")]
    Codec(String),

    /// Address bytes failed validation
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] TypeError),

    /// Governance lifecycle lookup failed
    #[error("Governance error: {0}")]
    Governance(#[from] GovernanceError),

    /// Signer is not the configured authority
    #[error("Unauthorized: expected authority {expected}, got {signer}")]
    Unauthorized { expected: Address, signer: Address },
}

/// Key-value store errors
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Transfer denial reasons returned by the pre-transfer guard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferGuardError {
    /// The sender is currently restricted
    #[error("Account {address} is restricted and cannot send funds")]
    RestrictedAccount { address: Address },

    /// Restriction state could not be read; the transfer is denied
    #[error("Restriction status for {address} unavailable: {reason}")]
    StatusUnavailable { address: Address, reason: String },
}

/// Errors from the governance lifecycle port
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("Unknown batch: {batch_id}")]
    UnknownBatch { batch_id: BatchId },

    #[error("Deposit overflow on batch {batch_id}")]
    DepositOverflow { batch_id: BatchId },
}

/// Genesis import/validation errors
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("Allow-listed address {address} cannot be restricted in genesis")]
    AllowListedAddress { address: Address },

    #[error("Duplicate restricted address in genesis: {address}")]
    DuplicateRestrictedAddress { address: Address },

    #[error("Duplicate temporary entry in genesis: {address}/{batch_id}")]
    DuplicateTemporaryEntry { address: Address, batch_id: BatchId },

    #[error("Genesis JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Restriction(#[from] RestrictionError),
}

impl From<KVStoreError> for GenesisError {
    fn from(err: KVStoreError) -> Self {
        GenesisError::Restriction(RestrictionError::Store(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_error_display() {
        let err = RestrictionError::AllowListedAddress {
            address: Address::new(vec![0xAA, 0xBB]).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Address 0xaabb is on the allow-list and cannot be restricted"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let err: RestrictionError = KVStoreError::IOError {
            message: "disk gone".into(),
        }
        .into();
        assert!(matches!(err, RestrictionError::Store(_)));
        assert_eq!(err.to_string(), "Store error: KV store I/O error: disk gone");
    }

    #[test]
    fn test_restricted_account_display() {
        let err = TransferGuardError::RestrictedAccount {
            address: Address::new(vec![0x01]).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Account 0x01 is restricted and cannot send funds"
        );
    }
}
