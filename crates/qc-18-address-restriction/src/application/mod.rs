//! Application layer for Address Restriction

pub mod genesis;
pub mod governance;
pub mod guard;
pub mod service;

pub use genesis::{export_genesis, import_genesis, GenesisState};
pub use governance::GovernanceHooks;
pub use guard::TransferGuard;
pub use service::RestrictionEngine;
