//! # QC-18: Address Restriction Subsystem
//!
//! Governance-driven account restrictions enforced before every transfer.
//!
//! ## Architecture
//!
//! - **Domain**: Params, allow-list, provisional entries, store key layout, invariants
//! - **Ports**: Inbound (RestrictionApi, RestrictionQueryApi, PreTransferHook) and
//!   Outbound (KeyValueStore, GovernanceLifecycle)
//! - **Store**: Permanent set, dual temporary index, params
//! - **Application**: Engine, transfer guard, governance hooks, genesis
//! - **Adapters**: In-memory store and governance lifecycle
//!
//! ## State Model
//!
//! ```text
//!                     ┌──────────────────────────┐
//!  restrict ────────→ │ Permanent set            │ ←──── unrestrict
//!                     └──────────────────────────┘
//!                     ┌──────────────────────────┐
//!  propose_* ───────→ │ Temporary (addr, batch)  │
//!                     │ Temporary (batch, addr)  │ ←──── resolve_batch
//!                     └──────────────────────────┘
//! ```
//!
//! `is_restricted` consults the allow-list, then the provisional entry with
//! the greatest batch id, then the permanent set. A direct restrict or
//! unrestrict purges the address's provisional entries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod store;

pub use adapters::{InMemoryGovernance, InMemoryKVStore};
pub use application::{
    export_genesis, import_genesis, GenesisState, GovernanceHooks, RestrictionEngine,
    TransferGuard,
};
pub use config::RestrictionConfig;
pub use domain::entities::*;
pub use domain::errors::*;
pub use domain::value_objects::*;
pub use domain::InvariantReport;
pub use ports::inbound::{PreTransferHook, RestrictionApi, RestrictionQueryApi};
pub use ports::outbound::{BatchOperation, GovernanceLifecycle, KeyValueStore, ScanResult};
