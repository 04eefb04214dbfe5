//! # Event Handlers
//!
//! Long-running tasks consuming the restriction event bus.

pub mod metrics;

pub use metrics::MetricsHandler;
