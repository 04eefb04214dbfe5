//! Transfer Guard
//!
//! Pre-transfer hook consulted by the ledger before any balance leaves an
//! account. Reads restriction state only.

use crate::domain::errors::TransferGuardError;
use crate::ports::inbound::{PreTransferHook, RestrictionApi};
use shared_types::{Address, ExecutionContext};
use std::sync::Arc;
use tracing::{debug, error};

pub struct TransferGuard<R: RestrictionApi> {
    restrictions: Arc<R>,
}

impl<R: RestrictionApi> TransferGuard<R> {
    pub fn new(restrictions: Arc<R>) -> Self {
        Self { restrictions }
    }
}

impl<R: RestrictionApi> PreTransferHook for TransferGuard<R> {
    fn check_send(&self, ctx: &ExecutionContext, from: &Address) -> Result<(), TransferGuardError> {
        if ctx.bypass() {
            debug!(%from, "Restriction check bypassed");
            return Ok(());
        }

        match self.restrictions.is_restricted(from) {
            Ok(false) => Ok(()),
            Ok(true) => {
                debug!(%from, "Transfer denied: sender restricted");
                Err(TransferGuardError::RestrictedAccount {
                    address: from.clone(),
                })
            }
            // No definitive answer means no transfer
            Err(e) => {
                error!(%from, error = %e, "Restriction status unreadable, denying transfer");
                Err(TransferGuardError::StatusUnavailable {
                    address: from.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
