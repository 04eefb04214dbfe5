//! Genesis import/export
//!
//! Snapshot of all restriction state as JSON, used to start a chain with a
//! known restricted set and to dump state for upgrades.

use crate::application::service::RestrictionEngine;
use crate::domain::entities::{AllowList, Params};
use crate::domain::errors::GenesisError;
use crate::domain::value_objects::TemporaryEntry;
use crate::ports::inbound::{RestrictionApi, RestrictionQueryApi};
use crate::ports::outbound::KeyValueStore;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId};
use std::collections::BTreeSet;
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    /// Absent means keep the configured default params.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    pub restricted_addresses: Vec<Address>,
    pub temporary_entries: Vec<TemporaryEntry>,
}

impl GenesisState {
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject duplicates and anything that would restrict an allow-listed
    /// address.
    pub fn validate(&self, allow_list: &AllowList) -> Result<(), GenesisError> {
        let mut seen = BTreeSet::new();
        for address in &self.restricted_addresses {
            if allow_list.contains(address) {
                return Err(GenesisError::AllowListedAddress {
                    address: address.clone(),
                });
            }
            if !seen.insert(address) {
                return Err(GenesisError::DuplicateRestrictedAddress {
                    address: address.clone(),
                });
            }
        }

        let mut seen: BTreeSet<(&Address, BatchId)> = BTreeSet::new();
        for entry in &self.temporary_entries {
            if entry.status.is_restricted() && allow_list.contains(&entry.address) {
                return Err(GenesisError::AllowListedAddress {
                    address: entry.address.clone(),
                });
            }
            if !seen.insert((&entry.address, entry.batch_id)) {
                return Err(GenesisError::DuplicateTemporaryEntry {
                    address: entry.address.clone(),
                    batch_id: entry.batch_id,
                });
            }
        }
        Ok(())
    }
}

/// Validate `state` and write it into the engine's store.
pub fn import_genesis<S: KeyValueStore>(
    engine: &RestrictionEngine<S>,
    state: &GenesisState,
) -> Result<(), GenesisError> {
    state.validate(engine.allow_list())?;

    if let Some(params) = &state.params {
        engine.set_params(params)?;
    }
    engine.restrict(&state.restricted_addresses)?;
    // After restrict: restricting purges the address's temporary entries
    for entry in &state.temporary_entries {
        engine.write_temporary(&entry.address, entry.batch_id, entry.status)?;
    }

    info!(
        restricted = state.restricted_addresses.len(),
        temporary = state.temporary_entries.len(),
        "Restriction genesis imported"
    );
    Ok(())
}

/// Read the engine's entire state back out.
pub fn export_genesis<S: KeyValueStore>(
    engine: &RestrictionEngine<S>,
) -> Result<GenesisState, GenesisError> {
    Ok(GenesisState {
        params: Some(engine.get_params()?),
        restricted_addresses: engine.restricted_addresses()?,
        temporary_entries: engine.temporary_entries(None)?,
    })
}
