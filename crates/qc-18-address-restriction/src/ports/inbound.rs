//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::Params;
use crate::domain::errors::{RestrictionError, TransferGuardError};
use crate::domain::value_objects::{Status, TemporaryEntry};
use shared_types::{Address, BatchId, Coins, ExecutionContext};

/// Primary Address Restriction API
///
/// Multi-address operations are applied address by address and stop at the
/// first error; addresses handled before the failure keep their new state.
pub trait RestrictionApi: Send + Sync {
    /// Whether `address` is restricted right now.
    ///
    /// Allow-listed addresses never are. Otherwise the provisional entry with
    /// the greatest batch id decides, falling back to the permanent set.
    fn is_restricted(&self, address: &Address) -> Result<bool, RestrictionError>;

    /// Permanently restrict each address, purging its provisional entries.
    fn restrict(&self, addresses: &[Address]) -> Result<(), RestrictionError>;

    /// Permanently unrestrict each address, purging its provisional entries.
    fn unrestrict(&self, addresses: &[Address]) -> Result<(), RestrictionError>;

    /// Provisionally restrict on behalf of `batch_id` if `deposit` meets the
    /// immediate-restrict threshold in `params`. No-op otherwise.
    fn propose_restrict(
        &self,
        batch_id: BatchId,
        addresses: &[Address],
        deposit: &Coins,
        params: &Params,
    ) -> Result<(), RestrictionError>;

    /// Provisionally unrestrict on behalf of `batch_id` if `deposit` meets the
    /// immediate-unrestrict threshold in `params`. No-op otherwise.
    fn propose_unrestrict(
        &self,
        batch_id: BatchId,
        addresses: &[Address],
        deposit: &Coins,
        params: &Params,
    ) -> Result<(), RestrictionError>;

    /// Remove every provisional entry created by `batch_id`.
    ///
    /// Idempotent. Returns the number of address entries removed.
    fn resolve_batch(&self, batch_id: BatchId) -> Result<usize, RestrictionError>;

    /// Current thresholds (defaults if never set).
    fn get_params(&self) -> Result<Params, RestrictionError>;

    /// Replace the thresholds.
    fn set_params(&self, params: &Params) -> Result<(), RestrictionError>;
}

/// Read-only queries over restriction state
pub trait RestrictionQueryApi: Send + Sync {
    /// All permanently restricted addresses, in key order.
    fn restricted_addresses(&self) -> Result<Vec<Address>, RestrictionError>;

    /// Provisional entries, optionally only those of one address.
    fn temporary_entries(
        &self,
        address: Option<&Address>,
    ) -> Result<Vec<TemporaryEntry>, RestrictionError>;

    /// Batch-keyed index entries, optionally only those of one batch.
    fn proposal_index_entries(
        &self,
        batch_id: Option<BatchId>,
    ) -> Result<Vec<TemporaryEntry>, RestrictionError>;

    /// The provisional entry that currently decides `address`, if any.
    fn latest_temporary_entry(
        &self,
        address: &Address,
    ) -> Result<Option<(BatchId, Status)>, RestrictionError>;

    /// Whether `address` is on the allow-list.
    fn is_unrestrictable(&self, address: &Address) -> bool;
}

/// Hook the ledger runs before every balance mutation.
///
/// Must not mutate restriction state. Any outcome other than `Ok(())` denies
/// the transfer.
pub trait PreTransferHook: Send + Sync {
    fn check_send(&self, ctx: &ExecutionContext, from: &Address) -> Result<(), TransferGuardError>;
}
