//! # Quantum Telemetry
//!
//! Logging and metrics for the address restriction node.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters for restriction activity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let telemetry = init_telemetry(TelemetryConfig::from_env())?;
//!     telemetry.metrics().transfers_denied.inc();
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `QC_SERVICE_NAME` | `quantum-chain` | Service name in logs |
//! | `QC_LOG_LEVEL` | `info` | Log level filter |
//! | `QC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `QC_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{encode_metrics, RestrictionMetrics, REGISTRY};
pub use prometheus::Registry;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register metrics with the global registry.
///
/// Call once per process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = RestrictionMetrics::register(&REGISTRY)?;
    init_logging(&config)?;

    Ok(TelemetryGuard { config, metrics })
}

/// Handle to the initialized telemetry stack.
pub struct TelemetryGuard {
    config: TelemetryConfig,
    metrics: RestrictionMetrics,
}

impl TelemetryGuard {
    pub fn metrics(&self) -> &RestrictionMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Current metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, TelemetryError> {
        encode_metrics(&REGISTRY)
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
