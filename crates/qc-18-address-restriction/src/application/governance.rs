//! Governance Hooks
//!
//! Drives the engine from batch lifecycle events:
//!
//! ```text
//! submitted / deposit  →  propose_restrict / propose_unrestrict (if threshold met)
//! concluded (passed)   →  restrict / unrestrict
//! concluded (any)      →  resolve_batch
//! ```

use crate::application::service::RestrictionEngine;
use crate::domain::entities::BatchInfo;
use crate::domain::errors::{GovernanceError, RestrictionError};
use crate::domain::value_objects::{BatchAction, BatchOutcome};
use crate::ports::inbound::RestrictionApi;
use crate::ports::outbound::{GovernanceLifecycle, KeyValueStore};
use shared_types::BatchId;
use std::sync::Arc;
use tracing::{info, warn};

pub struct GovernanceHooks<S: KeyValueStore, G: GovernanceLifecycle> {
    engine: Arc<RestrictionEngine<S>>,
    governance: Arc<G>,
}

impl<S: KeyValueStore, G: GovernanceLifecycle> GovernanceHooks<S, G> {
    pub fn new(engine: Arc<RestrictionEngine<S>>, governance: Arc<G>) -> Self {
        Self { engine, governance }
    }

    fn lookup(&self, batch_id: BatchId) -> Result<BatchInfo, RestrictionError> {
        self.governance
            .batch(batch_id)?
            .ok_or_else(|| GovernanceError::UnknownBatch { batch_id }.into())
    }

    /// A batch was submitted with an initial deposit.
    pub fn after_batch_submitted(&self, batch_id: BatchId) -> Result<(), RestrictionError> {
        self.apply_provisional(batch_id)
    }

    /// A batch received more deposit.
    ///
    /// Re-applies every action; entries already written are overwritten
    /// with the same status.
    pub fn after_batch_deposit(&self, batch_id: BatchId) -> Result<(), RestrictionError> {
        self.apply_provisional(batch_id)
    }

    /// Run a passed batch's actions as permanent mutations.
    pub fn execute_passed_batch(&self, batch_id: BatchId) -> Result<(), RestrictionError> {
        let batch = self.lookup(batch_id)?;
        for action in &batch.actions {
            match action {
                BatchAction::Restrict(addresses) => self.engine.restrict(addresses)?,
                BatchAction::Unrestrict(addresses) => self.engine.unrestrict(addresses)?,
            }
        }
        info!(batch_id, actions = batch.actions.len(), "Passed batch executed");
        Ok(())
    }

    /// A batch concluded. Executes it if it passed, then always cleans up.
    ///
    /// Cleanup runs even when execution fails; the execution error is
    /// returned afterwards. Returns the number of entries cleaned up.
    pub fn after_batch_concluded(
        &self,
        batch_id: BatchId,
        outcome: BatchOutcome,
    ) -> Result<usize, RestrictionError> {
        let executed = match outcome {
            BatchOutcome::Passed => self.execute_passed_batch(batch_id),
            BatchOutcome::Rejected | BatchOutcome::Expired => Ok(()),
        };
        if let Err(e) = &executed {
            warn!(batch_id, error = %e, "Passed batch failed to execute");
        }

        let removed = self.engine.resolve_batch(batch_id)?;
        executed?;
        info!(batch_id, ?outcome, removed, "Batch concluded");
        Ok(removed)
    }

    fn apply_provisional(&self, batch_id: BatchId) -> Result<(), RestrictionError> {
        let batch = self.lookup(batch_id)?;
        let params = self.engine.get_params()?;
        for action in &batch.actions {
            match action {
                BatchAction::Restrict(addresses) => {
                    self.engine
                        .propose_restrict(batch_id, addresses, &batch.deposit, &params)?
                }
                BatchAction::Unrestrict(addresses) => {
                    self.engine
                        .propose_unrestrict(batch_id, addresses, &batch.deposit, &params)?
                }
            }
        }
        Ok(())
    }
}
