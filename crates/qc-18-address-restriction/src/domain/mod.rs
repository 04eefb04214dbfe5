//! Domain module for Address Restriction
//!
//! Contains core entities, value objects, errors, key layout and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod keys;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::InvariantReport;
pub use value_objects::*;
