//! # Node Container
//!
//! Builds every runtime component once and hands out shared references.
//!
//! - Storage opened from `StorageConfig`
//! - Restriction engine and governance hooks over that store
//! - Transfer guard registered as the ledger's pre-transfer hook
//! - Event bus shared by all publishers

pub mod config;
pub mod services;

pub use config::{ConfigError, NodeConfig, StorageConfig};
pub use services::{NodeContainer, NodeEngine, NodeGovernanceHooks};
