//! In-memory governance lifecycle
//!
//! Holds submitted batches and their running deposits. Stands in for the
//! voting module in tests and in the single-process node.

use crate::domain::entities::BatchInfo;
use crate::domain::errors::GovernanceError;
use crate::domain::value_objects::BatchAction;
use crate::ports::outbound::GovernanceLifecycle;
use parking_lot::RwLock;
use shared_types::{BatchId, Coins};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct InMemoryGovernance {
    batches: RwLock<BTreeMap<BatchId, BatchInfo>>,
}

impl InMemoryGovernance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch. Replaces any batch already stored under the id.
    pub fn submit(&self, id: BatchId, deposit: Coins, actions: Vec<BatchAction>) -> BatchInfo {
        let info = BatchInfo::new(id, deposit, actions);
        self.batches.write().insert(id, info.clone());
        info
    }

    /// Add to a batch's deposit, returning the new total.
    pub fn add_deposit(&self, id: BatchId, amount: &Coins) -> Result<Coins, GovernanceError> {
        let mut batches = self.batches.write();
        let info = batches
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownBatch { batch_id: id })?;

        let total = info
            .deposit
            .checked_add(amount)
            .ok_or(GovernanceError::DepositOverflow { batch_id: id })?;
        info.deposit = total.clone();
        Ok(total)
    }

    /// Forget a concluded batch.
    pub fn remove(&self, id: BatchId) -> Option<BatchInfo> {
        self.batches.write().remove(&id)
    }
}

impl GovernanceLifecycle for InMemoryGovernance {
    fn batch(&self, batch_id: BatchId) -> Result<Option<BatchInfo>, GovernanceError> {
        Ok(self.batches.read().get(&batch_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn test_submit_and_lookup() {
        let gov = InMemoryGovernance::new();
        gov.submit(1, coins("5stake"), vec![]);

        assert_eq!(gov.batch_deposit(1).unwrap(), coins("5stake"));
        assert_eq!(
            gov.batch_deposit(2),
            Err(GovernanceError::UnknownBatch { batch_id: 2 })
        );
    }

    #[test]
    fn test_add_deposit_accumulates() {
        let gov = InMemoryGovernance::new();
        gov.submit(1, coins("5stake"), vec![]);

        let total = gov.add_deposit(1, &coins("7stake,1atom")).unwrap();
        assert_eq!(total, coins("12stake,1atom"));
        assert_eq!(gov.batch_deposit(1).unwrap(), total);
    }

    #[test]
    fn test_add_deposit_overflow_leaves_deposit_unchanged() {
        let gov = InMemoryGovernance::new();
        gov.submit(1, Coins::single(u128::MAX, "stake"), vec![]);

        assert_eq!(
            gov.add_deposit(1, &coins("1stake")),
            Err(GovernanceError::DepositOverflow { batch_id: 1 })
        );
        assert_eq!(
            gov.batch_deposit(1).unwrap(),
            Coins::single(u128::MAX, "stake")
        );
    }

    #[test]
    fn test_remove() {
        let gov = InMemoryGovernance::new();
        gov.submit(3, Coins::empty(), vec![]);
        assert!(gov.remove(3).is_some());
        assert_eq!(gov.batch(3).unwrap(), None);
    }
}
