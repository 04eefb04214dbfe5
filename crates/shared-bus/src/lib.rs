//! # Shared Bus - Event Bus for Restriction Observability
//!
//! Carries restriction, provisional-entry, governance and transfer-denial
//! events from the address restriction subsystem to any interested observer
//! (metrics, logs, indexers).
//!
//! ```text
//! ┌──────────────────┐   publish()   ┌──────────────┐  subscribe()  ┌───────────┐
//! │ Restriction (18) │ ────────────→ │  Event Bus   │ ────────────→ │ Observers │
//! └──────────────────┘               └──────────────┘               └───────────┘
//! ```
//!
//! Events never feed back into restriction state.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BlockchainEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 1000);
    }
}
