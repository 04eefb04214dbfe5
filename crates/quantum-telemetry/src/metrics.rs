//! Prometheus metrics for the address restriction subsystem.
//!
//! All metrics follow the naming convention: `qc_<subsystem>_<metric>_<unit>`
//!
//! Counters are owned by a [`RestrictionMetrics`] value rather than global
//! statics so tests can register them against a private [`Registry`].

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();
}

fn metrics_err(e: prometheus::Error) -> TelemetryError {
    TelemetryError::MetricsInit(e.to_string())
}

/// Counters fed from restriction events.
#[derive(Clone)]
pub struct RestrictionMetrics {
    /// Permanent restrictions applied
    pub addresses_restricted: IntCounter,
    /// Permanent restrictions lifted
    pub addresses_unrestricted: IntCounter,
    /// Provisional entries written, by status (restricted/unrestricted)
    pub provisional_entries: IntCounterVec,
    /// Batches cleaned up after concluding
    pub batches_resolved: IntCounter,
    /// Provisional entries removed by batch cleanup
    pub provisional_entries_removed: IntCounter,
    /// Parameter updates
    pub params_updates: IntCounter,
    /// Transfers rejected by the pre-transfer guard
    pub transfers_denied: IntCounter,
}

impl RestrictionMetrics {
    /// Create the counters and register them with `registry`.
    pub fn register(registry: &Registry) -> Result<Self, TelemetryError> {
        let metrics = Self {
            addresses_restricted: IntCounter::new(
                "qc_restriction_addresses_restricted_total",
                "Total addresses added to the permanent restricted set",
            )
            .map_err(metrics_err)?,
            addresses_unrestricted: IntCounter::new(
                "qc_restriction_addresses_unrestricted_total",
                "Total addresses removed from the permanent restricted set",
            )
            .map_err(metrics_err)?,
            provisional_entries: IntCounterVec::new(
                Opts::new(
                    "qc_restriction_provisional_entries_total",
                    "Provisional entries written by governance batches",
                ),
                &["status"],
            )
            .map_err(metrics_err)?,
            batches_resolved: IntCounter::new(
                "qc_restriction_batches_resolved_total",
                "Total governance batches cleaned up",
            )
            .map_err(metrics_err)?,
            provisional_entries_removed: IntCounter::new(
                "qc_restriction_provisional_entries_removed_total",
                "Provisional entries removed by batch cleanup",
            )
            .map_err(metrics_err)?,
            params_updates: IntCounter::new(
                "qc_restriction_params_updates_total",
                "Deposit threshold updates",
            )
            .map_err(metrics_err)?,
            transfers_denied: IntCounter::new(
                "qc_restriction_transfers_denied_total",
                "Transfers rejected because the sender is restricted",
            )
            .map_err(metrics_err)?,
        };

        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(metrics.addresses_restricted.clone()),
            Box::new(metrics.addresses_unrestricted.clone()),
            Box::new(metrics.provisional_entries.clone()),
            Box::new(metrics.batches_resolved.clone()),
            Box::new(metrics.provisional_entries_removed.clone()),
            Box::new(metrics.params_updates.clone()),
            Box::new(metrics.transfers_denied.clone()),
        ];
        for collector in collectors {
            registry.register(collector).map_err(metrics_err)?;
        }

        Ok(metrics)
    }
}

/// Encode all metrics in `registry` as Prometheus text format.
pub fn encode_metrics(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).map_err(metrics_err)?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
