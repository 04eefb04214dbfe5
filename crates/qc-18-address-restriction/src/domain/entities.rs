//! Core entities for Address Restriction

use super::value_objects::BatchAction;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId, Coins};
use std::collections::BTreeSet;

/// Deposit thresholds for immediate (provisional) effect.
///
/// An empty threshold disables the immediate effect for that direction: the
/// change then only happens if the batch passes and is executed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub immediate_restrict_min_deposit: Coins,
    pub immediate_unrestrict_min_deposit: Coins,
}

impl Params {
    pub fn new(restrict_min: Coins, unrestrict_min: Coins) -> Self {
        Self {
            immediate_restrict_min_deposit: restrict_min,
            immediate_unrestrict_min_deposit: unrestrict_min,
        }
    }

    /// Whether `deposit` is enough for a restriction to apply immediately.
    pub fn restrict_threshold_met(&self, deposit: &Coins) -> bool {
        threshold_met(deposit, &self.immediate_restrict_min_deposit)
    }

    /// Whether `deposit` is enough for an unrestriction to apply immediately.
    pub fn unrestrict_threshold_met(&self, deposit: &Coins) -> bool {
        threshold_met(deposit, &self.immediate_unrestrict_min_deposit)
    }
}

fn threshold_met(deposit: &Coins, min: &Coins) -> bool {
    !min.is_empty() && deposit.is_all_gte(min)
}

/// Addresses that can never be restricted. Fixed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList(BTreeSet<Address>);

impl AllowList {
    pub fn new(addresses: impl IntoIterator<Item = Address>) -> Self {
        Self(addresses.into_iter().collect())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}

/// What the restriction subsystem needs to know about a governance batch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub id: BatchId,
    /// Total deposit currently escrowed for the batch
    pub deposit: Coins,
    pub actions: Vec<BatchAction>,
}

impl BatchInfo {
    pub fn new(id: BatchId, deposit: Coins, actions: Vec<BatchAction>) -> Self {
        Self {
            id,
            deposit,
            actions,
        }
    }
}
