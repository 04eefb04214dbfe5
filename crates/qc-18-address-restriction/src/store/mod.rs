//! Typed views over the key-value store
//!
//! Each view owns one or two namespaces from `domain::keys` and knows how to
//! encode its values. None of them publish events or log above `trace`;
//! that is the engine's job.

pub mod params;
pub mod permanent;
pub mod temporary;

pub use params::ParamStore;
pub use permanent::PermanentStore;
pub use temporary::TemporaryIndex;
