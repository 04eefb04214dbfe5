//! Restriction Engine
//!
//! Main service implementing `RestrictionApi` and `RestrictionQueryApi`.
//! Owns the permanent set, the dual temporary index and the params; nothing
//! else writes to those namespaces.

use crate::config::RestrictionConfig;
use crate::domain::entities::{AllowList, Params};
use crate::domain::errors::RestrictionError;
use crate::domain::invariants::{
    effective_status, invariant_allow_list, invariant_dual_index, InvariantReport,
};
use crate::domain::value_objects::{Status, TemporaryEntry};
use crate::ports::inbound::{RestrictionApi, RestrictionQueryApi};
use crate::ports::outbound::KeyValueStore;
use crate::store::{ParamStore, PermanentStore, TemporaryIndex};
use shared_bus::{BlockchainEvent, EventPublisher};
use shared_types::{Address, BatchId, Coins};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Address Restriction Engine
///
/// Effective state of an address:
/// 1. Allow-listed: never restricted
/// 2. Provisional entry with the greatest batch id, if any
/// 3. Permanent set membership
pub struct RestrictionEngine<S: KeyValueStore> {
    allow_list: AllowList,
    authority: Option<Address>,
    permanent: PermanentStore<S>,
    temporary: TemporaryIndex<S>,
    params: ParamStore<S>,
    events: Arc<dyn EventPublisher>,
}

impl<S: KeyValueStore> RestrictionEngine<S> {
    pub fn new(store: Arc<S>, config: RestrictionConfig, events: Arc<dyn EventPublisher>) -> Self {
        let allow_list = config.allow_list();
        info!(
            unrestrictable = allow_list.len(),
            authority = ?config.authority,
            "Restriction engine initialized"
        );
        Self {
            allow_list,
            authority: config.authority,
            permanent: PermanentStore::new(store.clone()),
            temporary: TemporaryIndex::new(store.clone()),
            params: ParamStore::new(store, config.default_params),
            events,
        }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Fail with the first allow-listed address in `addresses`, if any.
    ///
    /// `restrict` and `propose_restrict` stop at the first bad address but
    /// keep what they already applied. Call this first to get
    /// all-or-nothing behaviour.
    pub fn ensure_restrictable(&self, addresses: &[Address]) -> Result<(), RestrictionError> {
        match addresses.iter().find(|a| self.allow_list.contains(a)) {
            Some(address) => Err(RestrictionError::AllowListedAddress {
                address: address.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Check `signer` against the configured authority.
    ///
    /// With no authority configured every signer is accepted.
    pub fn authorize(&self, signer: &Address) -> Result<(), RestrictionError> {
        match &self.authority {
            Some(expected) if expected != signer => {
                warn!(%signer, %expected, "Rejected unauthorized signer");
                Err(RestrictionError::Unauthorized {
                    expected: expected.clone(),
                    signer: signer.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// `set_params` on behalf of `signer`.
    pub fn update_params(&self, signer: &Address, params: &Params) -> Result<(), RestrictionError> {
        self.authorize(signer)?;
        self.set_params(params)
    }

    /// Forget stored params; `get_params` returns the configured defaults.
    pub fn reset_params(&self) -> Result<(), RestrictionError> {
        self.params.reset()?;
        let params = self.params.defaults().clone();
        info!(
            restrict_min = %params.immediate_restrict_min_deposit,
            unrestrict_min = %params.immediate_unrestrict_min_deposit,
            "Restriction params reset to defaults"
        );
        self.publish_params(params);
        Ok(())
    }

    /// Walk every namespace and check the dual index, the allow-list and
    /// that point lookups pick the latest batch.
    pub fn check_invariants(&self) -> Result<InvariantReport, RestrictionError> {
        let by_address = self.temporary.iterate(None)?;
        let by_batch = self.temporary.iterate_batch(None)?;
        let permanent = self.permanent.iterate()?;

        let permanent_set: BTreeSet<&Address> = permanent.iter().collect();
        let mut latest_batch_wins = true;
        for address in by_address.iter().map(|e| &e.address).collect::<BTreeSet<_>>() {
            if self.allow_list.contains(address) {
                continue;
            }
            let expected =
                effective_status(address, &by_address, permanent_set.contains(address));
            if self.is_restricted(address)? != expected {
                warn!(%address, expected, "Point lookup disagrees with index scan");
                latest_batch_wins = false;
            }
        }

        let report = InvariantReport {
            dual_index_consistent: invariant_dual_index(&by_address, &by_batch),
            allow_list_respected: invariant_allow_list(&self.allow_list, &permanent, &by_address),
            latest_batch_wins,
            temporary_entries: by_address.len(),
            permanent_entries: permanent.len(),
        };
        if !report.holds() {
            warn!(?report, "Restriction invariants violated");
        }
        Ok(report)
    }

    // Used by genesis import, which validates the allow-list itself.
    pub(crate) fn write_temporary(
        &self,
        address: &Address,
        batch_id: BatchId,
        status: Status,
    ) -> Result<(), RestrictionError> {
        self.temporary.put(address, batch_id, status)
    }

    fn propose(
        &self,
        batch_id: BatchId,
        addresses: &[Address],
        status: Status,
    ) -> Result<(), RestrictionError> {
        for address in addresses {
            if status.is_restricted() && self.allow_list.contains(address) {
                return Err(RestrictionError::AllowListedAddress {
                    address: address.clone(),
                });
            }
            self.temporary.put(address, batch_id, status)?;
            let event = match status {
                Status::Restricted => BlockchainEvent::ProvisionalRestricted {
                    address: address.clone(),
                    batch_id,
                },
                Status::Unrestricted => BlockchainEvent::ProvisionalUnrestricted {
                    address: address.clone(),
                    batch_id,
                },
            };
            self.events.publish(event);
        }
        info!(
            batch_id,
            ?status,
            addresses = addresses.len(),
            "Provisional entries applied"
        );
        Ok(())
    }

    fn publish_params(&self, params: Params) {
        self.events.publish(BlockchainEvent::RestrictionParamsUpdated {
            immediate_restrict_min_deposit: params.immediate_restrict_min_deposit,
            immediate_unrestrict_min_deposit: params.immediate_unrestrict_min_deposit,
        });
    }
}

impl<S: KeyValueStore> RestrictionApi for RestrictionEngine<S> {
    fn is_restricted(&self, address: &Address) -> Result<bool, RestrictionError> {
        if self.allow_list.contains(address) {
            return Ok(false);
        }
        if let Some((batch_id, status)) = self.temporary.get_latest(address)? {
            debug!(%address, batch_id, ?status, "Provisional entry decides");
            return Ok(status.is_restricted());
        }
        self.permanent.contains(address)
    }

    fn restrict(&self, addresses: &[Address]) -> Result<(), RestrictionError> {
        for address in addresses {
            self.permanent.add(&self.allow_list, address)?;
            self.events.publish(BlockchainEvent::AddressRestricted {
                address: address.clone(),
            });
            let purged = self.temporary.delete_for_address(address)?;
            info!(%address, purged, "Address restricted");
        }
        Ok(())
    }

    fn unrestrict(&self, addresses: &[Address]) -> Result<(), RestrictionError> {
        for address in addresses {
            self.permanent.remove(address)?;
            self.events.publish(BlockchainEvent::AddressUnrestricted {
                address: address.clone(),
            });
            let purged = self.temporary.delete_for_address(address)?;
            info!(%address, purged, "Address unrestricted");
        }
        Ok(())
    }

    fn propose_restrict(
        &self,
        batch_id: BatchId,
        addresses: &[Address],
        deposit: &Coins,
        params: &Params,
    ) -> Result<(), RestrictionError> {
        if !params.restrict_threshold_met(deposit) {
            debug!(
                batch_id,
                %deposit,
                min = %params.immediate_restrict_min_deposit,
                "Deposit below immediate restrict threshold"
            );
            return Ok(());
        }
        self.propose(batch_id, addresses, Status::Restricted)
    }

    fn propose_unrestrict(
        &self,
        batch_id: BatchId,
        addresses: &[Address],
        deposit: &Coins,
        params: &Params,
    ) -> Result<(), RestrictionError> {
        if !params.unrestrict_threshold_met(deposit) {
            debug!(
                batch_id,
                %deposit,
                min = %params.immediate_unrestrict_min_deposit,
                "Deposit below immediate unrestrict threshold"
            );
            return Ok(());
        }
        self.propose(batch_id, addresses, Status::Unrestricted)
    }

    fn resolve_batch(&self, batch_id: BatchId) -> Result<usize, RestrictionError> {
        let removed = self.temporary.delete_for_batch(batch_id)?;
        self.events.publish(BlockchainEvent::BatchResolved {
            batch_id,
            entries_removed: removed,
        });
        info!(batch_id, removed, "Batch resolved");
        Ok(removed)
    }

    fn get_params(&self) -> Result<Params, RestrictionError> {
        self.params.get()
    }

    fn set_params(&self, params: &Params) -> Result<(), RestrictionError> {
        self.params.set(params)?;
        info!(
            restrict_min = %params.immediate_restrict_min_deposit,
            unrestrict_min = %params.immediate_unrestrict_min_deposit,
            "Restriction params updated"
        );
        self.publish_params(params.clone());
        Ok(())
    }
}

impl<S: KeyValueStore> RestrictionQueryApi for RestrictionEngine<S> {
    fn restricted_addresses(&self) -> Result<Vec<Address>, RestrictionError> {
        self.permanent.iterate()
    }

    fn temporary_entries(
        &self,
        address: Option<&Address>,
    ) -> Result<Vec<TemporaryEntry>, RestrictionError> {
        self.temporary.iterate(address)
    }

    fn proposal_index_entries(
        &self,
        batch_id: Option<BatchId>,
    ) -> Result<Vec<TemporaryEntry>, RestrictionError> {
        self.temporary.iterate_batch(batch_id)
    }

    fn latest_temporary_entry(
        &self,
        address: &Address,
    ) -> Result<Option<(BatchId, Status)>, RestrictionError> {
        self.temporary.get_latest(address)
    }

    fn is_unrestrictable(&self, address: &Address) -> bool {
        self.allow_list.contains(address)
    }
}
