//! # Shared Types Crate
//!
//! Value types shared by the address restriction subsystem, the node runtime
//! and the test suite.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `BatchId` and `Coins` are defined
//!   once here and reused everywhere.
//! - **Validated Construction**: an `Address` can only be built with 1..=255
//!   bytes, so store keys can always length-prefix it.
//! - **Explicit Context**: per-operation flags travel in `ExecutionContext`,
//!   never in global state.

pub mod context;
pub mod entities;
pub mod errors;

pub use context::ExecutionContext;
pub use entities::*;
pub use errors::*;
