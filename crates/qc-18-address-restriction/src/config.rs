//! Configuration for Address Restriction Subsystem

use crate::domain::entities::{AllowList, Params};
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Restriction engine configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionConfig {
    /// Addresses that can never be restricted (module and system accounts)
    pub unrestrictable_addresses: Vec<Address>,
    /// Thresholds used until governance sets its own
    pub default_params: Params,
    /// Account allowed to execute passed batches and update params
    pub authority: Option<Address>,
}

impl RestrictionConfig {
    pub fn with_unrestrictable(mut self, addresses: impl IntoIterator<Item = Address>) -> Self {
        self.unrestrictable_addresses.extend(addresses);
        self
    }

    pub fn with_default_params(mut self, params: Params) -> Self {
        self.default_params = params;
        self
    }

    pub fn with_authority(mut self, authority: Address) -> Self {
        self.authority = Some(authority);
        self
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.unrestrictable_addresses.iter().cloned())
    }
}
