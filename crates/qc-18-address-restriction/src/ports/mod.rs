//! Ports module for Address Restriction
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{PreTransferHook, RestrictionApi, RestrictionQueryApi};
pub use outbound::{BatchOperation, GovernanceLifecycle, KeyValueStore, ScanResult};
