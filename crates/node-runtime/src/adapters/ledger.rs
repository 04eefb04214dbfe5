//! # Ledger Adapter
//!
//! Minimal in-memory balance ledger hosting the pre-transfer hook chain.
//!
//! Every transfer runs all registered `PreTransferHook`s against the sender
//! before any balance moves. A single denial aborts the transfer with no
//! state change.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use qc_18_address_restriction::{PreTransferHook, TransferGuardError};
use shared_bus::{BlockchainEvent, EventPublisher};
use shared_types::{Address, Coins, ExecutionContext};

/// Ledger errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A pre-transfer hook rejected the sender.
    #[error("Transfer denied: {0}")]
    Denied(#[from] TransferGuardError),

    /// The sender does not hold the amount.
    #[error("Insufficient funds: {address} holds {available}, needs {required}")]
    InsufficientFunds {
        address: Address,
        available: Coins,
        required: Coins,
    },

    /// A balance would exceed the amount range.
    #[error("Balance overflow for {address}")]
    Overflow { address: Address },
}

/// In-memory ledger with a pre-transfer hook chain.
pub struct InMemoryLedger {
    balances: RwLock<BTreeMap<Address, Coins>>,
    hooks: Vec<Arc<dyn PreTransferHook>>,
    events: Arc<dyn EventPublisher>,
}

impl InMemoryLedger {
    pub fn new(events: Arc<dyn EventPublisher>) -> Self {
        Self {
            balances: RwLock::new(BTreeMap::new()),
            hooks: Vec::new(),
            events,
        }
    }

    /// Append a hook to the chain. Hooks run in registration order.
    pub fn with_hook(mut self, hook: Arc<dyn PreTransferHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Credit `amount` to `address` without running hooks.
    pub fn mint(&self, address: &Address, amount: &Coins) -> Result<(), LedgerError> {
        let mut balances = self.balances.write();
        let current = balances.get(address).cloned().unwrap_or_default();
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow {
                address: address.clone(),
            })?;
        balances.insert(address.clone(), updated);
        Ok(())
    }

    pub fn balance(&self, address: &Address) -> Coins {
        self.balances
            .read()
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    /// Move `amount` from `from` to `to` after every hook approves `from`.
    pub fn transfer(
        &self,
        ctx: &ExecutionContext,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), LedgerError> {
        for hook in &self.hooks {
            if let Err(e) = hook.check_send(ctx, from) {
                warn!(%from, %to, error = %e, "Transfer rejected by pre-transfer hook");
                if matches!(e, TransferGuardError::RestrictedAccount { .. }) {
                    self.events.publish(BlockchainEvent::TransferDenied {
                        address: from.clone(),
                    });
                }
                return Err(e.into());
            }
        }

        let mut balances = self.balances.write();
        let available = balances.get(from).cloned().unwrap_or_default();
        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                address: from.clone(),
                available: available.clone(),
                required: amount.clone(),
            })?;

        if from == to {
            return Ok(());
        }

        let credited = balances
            .get(to)
            .cloned()
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow {
                address: to.clone(),
            })?;

        balances.insert(from.clone(), debited);
        balances.insert(to.clone(), credited);
        debug!(%from, %to, %amount, "Transfer applied");
        Ok(())
    }
}
