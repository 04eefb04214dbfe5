//! # Metrics Handler
//!
//! Subscribes to every restriction event on the bus and feeds the
//! Prometheus counters in `quantum-telemetry`. Observes only; never touches
//! restriction state.

use quantum_telemetry::{metric_inc, RestrictionMetrics};
use shared_bus::{BlockchainEvent, Subscription};
use tracing::{debug, info};

/// Event-bus subscriber that counts restriction activity.
pub struct MetricsHandler {
    subscription: Subscription,
    metrics: RestrictionMetrics,
}

impl MetricsHandler {
    pub fn new(subscription: Subscription, metrics: RestrictionMetrics) -> Self {
        Self {
            subscription,
            metrics,
        }
    }

    /// Update counters for a single event.
    pub fn record(&self, event: &BlockchainEvent) {
        match event {
            BlockchainEvent::AddressRestricted { .. } => {
                metric_inc!(self.metrics.addresses_restricted);
            }
            BlockchainEvent::AddressUnrestricted { .. } => {
                metric_inc!(self.metrics.addresses_unrestricted);
            }
            BlockchainEvent::ProvisionalRestricted { .. } => {
                metric_inc!(self.metrics.provisional_entries, &["restricted"]);
            }
            BlockchainEvent::ProvisionalUnrestricted { .. } => {
                metric_inc!(self.metrics.provisional_entries, &["unrestricted"]);
            }
            BlockchainEvent::BatchResolved {
                entries_removed, ..
            } => {
                metric_inc!(self.metrics.batches_resolved);
                self.metrics
                    .provisional_entries_removed
                    .inc_by(*entries_removed as u64);
            }
            BlockchainEvent::RestrictionParamsUpdated { .. } => {
                metric_inc!(self.metrics.params_updates);
            }
            BlockchainEvent::TransferDenied { .. } => {
                metric_inc!(self.metrics.transfers_denied);
            }
        }
    }

    /// Run until the bus closes.
    pub async fn run(mut self) {
        info!("[qc-18] Metrics handler started");

        while let Some(event) = self.subscription.recv().await {
            debug!(topic = ?event.topic(), "Recording restriction event");
            self.record(&event);
        }

        info!("[qc-18] Event bus closed, metrics handler stopping");
    }
}
