//! Deposit threshold parameters
//!
//! Each threshold is stored under its own key. A missing key falls back to
//! the configured default for that field alone, so a node can upgrade its
//! defaults without overriding a value governance already chose.

use crate::domain::entities::Params;
use crate::domain::errors::RestrictionError;
use crate::domain::keys;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use shared_types::Coins;
use std::sync::Arc;

const RESTRICT_MIN_KEY: &str = "immediate_restrict_min_deposit";
const UNRESTRICT_MIN_KEY: &str = "immediate_unrestrict_min_deposit";

pub struct ParamStore<S: KeyValueStore> {
    store: Arc<S>,
    defaults: Params,
}

impl<S: KeyValueStore> ParamStore<S> {
    pub fn new(store: Arc<S>, defaults: Params) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    /// Stored params, with per-field fallback to defaults.
    pub fn get(&self) -> Result<Params, RestrictionError> {
        let restrict = self
            .read_coins(RESTRICT_MIN_KEY)?
            .unwrap_or_else(|| self.defaults.immediate_restrict_min_deposit.clone());
        let unrestrict = self
            .read_coins(UNRESTRICT_MIN_KEY)?
            .unwrap_or_else(|| self.defaults.immediate_unrestrict_min_deposit.clone());
        Ok(Params::new(restrict, unrestrict))
    }

    /// Store both thresholds atomically.
    ///
    /// Empty thresholds are stored as such; they disable the immediate
    /// effect rather than reverting to the default.
    pub fn set(&self, params: &Params) -> Result<(), RestrictionError> {
        self.store.atomic_batch_write(vec![
            BatchOperation::put(
                keys::params_key(RESTRICT_MIN_KEY),
                encode(&params.immediate_restrict_min_deposit)?,
            ),
            BatchOperation::put(
                keys::params_key(UNRESTRICT_MIN_KEY),
                encode(&params.immediate_unrestrict_min_deposit)?,
            ),
        ])?;
        Ok(())
    }

    /// Drop stored values so `get` returns the defaults again.
    pub fn reset(&self) -> Result<(), RestrictionError> {
        self.store.atomic_batch_write(vec![
            BatchOperation::delete(keys::params_key(RESTRICT_MIN_KEY)),
            BatchOperation::delete(keys::params_key(UNRESTRICT_MIN_KEY)),
        ])?;
        Ok(())
    }

    fn read_coins(&self, name: &str) -> Result<Option<Coins>, RestrictionError> {
        self.store
            .get(&keys::params_key(name))?
            .map(|bytes| {
                bincode::deserialize(&bytes)
                    .map_err(|e| RestrictionError::Codec(format!("param {name}: {e}")))
            })
            .transpose()
    }
}

fn encode(coins: &Coins) -> Result<Vec<u8>, RestrictionError> {
    bincode::serialize(coins).map_err(|e| RestrictionError::Codec(e.to_string()))
}
