//! Domain invariants for Address Restriction
//!
//! Pure checks over snapshots of the stores. The engine exposes them through
//! `RestrictionEngine::check_invariants`; genesis import and tests use them to
//! prove both indexes stayed in lockstep.

use super::entities::AllowList;
use super::value_objects::{Status, TemporaryEntry};
use shared_types::{Address, BatchId};
use std::collections::BTreeMap;

/// INVARIANT-1: Dual-Index Consistency
/// Every address-keyed entry has exactly one batch-keyed mirror with the same
/// status, and vice versa.
pub fn invariant_dual_index(by_address: &[TemporaryEntry], by_batch: &[TemporaryEntry]) -> bool {
    let index = |entries: &[TemporaryEntry]| -> Option<BTreeMap<(Address, BatchId), Status>> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let key = (entry.address.clone(), entry.batch_id);
            if map.insert(key, entry.status).is_some() {
                return None;
            }
        }
        Some(map)
    };

    match (index(by_address), index(by_batch)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// INVARIANT-2: Latest Batch Wins
/// The effective status of an address is the status of its entry with the
/// greatest batch id, falling back to permanent membership.
pub fn effective_status(
    address: &Address,
    entries: &[TemporaryEntry],
    permanently_restricted: bool,
) -> bool {
    entries
        .iter()
        .filter(|e| &e.address == address)
        .max_by_key(|e| e.batch_id)
        .map(|e| e.status.is_restricted())
        .unwrap_or(permanently_restricted)
}

/// INVARIANT-3: Allow-List Protection
/// No allow-listed address is permanently restricted or holds a restricting
/// temporary entry.
pub fn invariant_allow_list(
    allow_list: &AllowList,
    permanent: &[Address],
    entries: &[TemporaryEntry],
) -> bool {
    permanent.iter().all(|a| !allow_list.contains(a))
        && entries
            .iter()
            .filter(|e| e.status.is_restricted())
            .all(|e| !allow_list.contains(&e.address))
}

/// Result of walking the stores
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvariantReport {
    pub dual_index_consistent: bool,
    pub allow_list_respected: bool,
    /// Point lookups agree with a full scan of the temporary index
    pub latest_batch_wins: bool,
    pub temporary_entries: usize,
    pub permanent_entries: usize,
}

impl InvariantReport {
    pub fn holds(&self) -> bool {
        self.dual_index_consistent && self.allow_list_respected && self.latest_batch_wins
    }
}
