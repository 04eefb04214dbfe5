//! # Blockchain Events
//!
//! Defines the event types that flow through the shared bus.
//! Events are observability only: no subscriber may change restriction
//! state in response to them.

use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId, Coins};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockchainEvent {
    // =========================================================================
    // PERMANENT RESTRICTIONS
    // =========================================================================
    /// An address was added to the permanent restricted set.
    AddressRestricted { address: Address },

    /// An address was removed from the permanent restricted set.
    AddressUnrestricted { address: Address },

    // =========================================================================
    // PROVISIONAL (BATCH-SCOPED) ENTRIES
    // =========================================================================
    /// A batch with a sufficient deposit provisionally restricted an address.
    ProvisionalRestricted { address: Address, batch_id: BatchId },

    /// A batch with a sufficient deposit provisionally unrestricted an address.
    ProvisionalUnrestricted { address: Address, batch_id: BatchId },

    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// A concluded batch had its provisional entries cleaned up.
    BatchResolved {
        batch_id: BatchId,
        /// Number of address entries removed (zero when already clean).
        entries_removed: usize,
    },

    /// Immediate-effect deposit thresholds changed.
    RestrictionParamsUpdated {
        immediate_restrict_min_deposit: Coins,
        immediate_unrestrict_min_deposit: Coins,
    },

    // =========================================================================
    // TRANSFER ENFORCEMENT
    // =========================================================================
    /// A transfer from a restricted address was denied.
    TransferDenied { address: Address },
}

impl BlockchainEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AddressRestricted { .. } | Self::AddressUnrestricted { .. } => {
                EventTopic::Restriction
            }
            Self::ProvisionalRestricted { .. } | Self::ProvisionalUnrestricted { .. } => {
                EventTopic::Provisional
            }
            Self::BatchResolved { .. } | Self::RestrictionParamsUpdated { .. } => {
                EventTopic::Governance
            }
            Self::TransferDenied { .. } => EventTopic::Transfer,
        }
    }

    /// The address this event concerns, if any.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::AddressRestricted { address }
            | Self::AddressUnrestricted { address }
            | Self::ProvisionalRestricted { address, .. }
            | Self::ProvisionalUnrestricted { address, .. }
            | Self::TransferDenied { address } => Some(address),
            Self::BatchResolved { .. } | Self::RestrictionParamsUpdated { .. } => None,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Permanent restrict/unrestrict.
    Restriction,
    /// Batch-scoped provisional entries.
    Provisional,
    /// Batch resolution and parameter changes.
    Governance,
    /// Transfer guard decisions.
    Transfer,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Only events concerning this address. `None` means any address.
    pub address: Option<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            address: None,
        }
    }

    /// Create a filter for events about a single address.
    #[must_use]
    pub fn for_address(address: Address) -> Self {
        Self {
            topics: Vec::new(),
            address: Some(address),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &BlockchainEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let address_match = match &self.address {
            None => true,
            Some(wanted) => event.address() == Some(wanted),
        };

        topic_match && address_match
    }
}
