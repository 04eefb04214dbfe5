//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: restriction events reach observers via the Event Bus only
//! - **Hexagonal Architecture**: qc-18 defines ports, this crate supplies the adapters
//! - **Plug-and-Play Storage**: in-memory or RocksDB, chosen by configuration

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod genesis;
pub mod handlers;

pub use container::{NodeConfig, NodeContainer};
pub use genesis::{NodeGenesis, NodeGenesisError};
