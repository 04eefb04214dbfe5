//! # Integration Tests
//!
//! Flows spanning the restriction engine, the event bus and the node runtime.

pub mod genesis_flow;
pub mod governance_flow;
pub mod ledger_flow;
pub mod properties;

use qc_18_address_restriction::Params;
use shared_types::{Address, Coins};

/// Deterministic 20-byte test address.
pub fn addr(b: u8) -> Address {
    Address::repeat(b, 20)
}

pub fn stake(amount: u128) -> Coins {
    Coins::single(amount, "stake")
}

/// Params requiring `min` stake for either immediate effect.
pub fn stake_params(min: u128) -> Params {
    Params::new(stake(min), stake(min))
}
