//! # Quantum-Chain Restriction Node
//!
//! Host process for the address restriction subsystem (qc-18).
//!
//! ## Event Flow
//!
//! ```text
//! GovernanceHooks ──→ RestrictionEngine ──publish──→ Event Bus ──→ MetricsHandler
//!                            ↑
//!                      TransferGuard
//!                            ↑ check_send
//! InMemoryLedger ────── TransferDenied ────────────→ Event Bus
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging and metrics
//! 3. Open storage and build services
//! 4. Apply genesis (restriction state only into an empty store)
//! 5. Start event handlers (spawn async tasks)
//! 6. Wait for Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use node_runtime::container::{NodeConfig, NodeContainer};
use node_runtime::genesis::NodeGenesis;
use node_runtime::handlers::MetricsHandler;
use qc_18_address_restriction::RestrictionQueryApi;
use quantum_telemetry::{init_telemetry, TelemetryGuard};

/// The node runtime orchestrating all services.
pub struct NodeRuntime {
    /// Service container.
    container: Arc<NodeContainer>,
    /// Logging and metrics handle.
    telemetry: TelemetryGuard,
    /// Shutdown signal sender.
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Build the runtime from configuration.
    pub fn new(config: NodeConfig, telemetry: TelemetryGuard) -> Result<Self> {
        info!("Creating restriction node runtime");

        let container =
            Arc::new(NodeContainer::new(config).context("Failed to open restriction store")?);

        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Ok(Self {
            container,
            telemetry,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start the node runtime.
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  Quantum-Chain Restriction Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        // Handlers first so genesis events are counted
        self.start_handlers();
        self.initialize_genesis()?;

        let report = self
            .container
            .engine
            .check_invariants()
            .context("Failed to check restriction invariants")?;
        if !report.holds() {
            error!(?report, "Restriction store violates its invariants");
            anyhow::bail!("Restriction store is inconsistent");
        }

        info!(
            restricted = self.container.engine.restricted_addresses()?.len(),
            data_dir = %self.container.config.storage.data_dir.display(),
            "Node running"
        );
        Ok(())
    }

    fn initialize_genesis(&self) -> Result<()> {
        let Some(path) = &self.container.config.genesis_path else {
            info!("No genesis file configured");
            return Ok(());
        };

        let genesis = NodeGenesis::load(path)
            .with_context(|| format!("Failed to load genesis from {}", path.display()))?;
        genesis
            .apply(
                &self.container.store,
                &self.container.engine,
                &self.container.ledger,
            )
            .context("Failed to apply genesis")?;
        Ok(())
    }

    fn start_handlers(&self) {
        let handler = MetricsHandler::new(
            self.container.subscribe_all(),
            self.telemetry.metrics().clone(),
        );
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = handler.run() => {}
                _ = shutdown.changed() => {
                    info!("[qc-18] Metrics handler shutdown signal received");
                }
            }
        });

        info!("Event handlers started");
    }

    /// Shutdown the node gracefully.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        // Give handlers time to drain
        tokio::time::sleep(Duration::from_millis(200)).await;

        match self.telemetry.render() {
            Ok(metrics) => info!("Final metrics:\n{metrics}"),
            Err(e) => error!(error = %e, "Failed to render metrics"),
        }
        info!("Shutdown complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Invalid node configuration")?;
    let telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    let runtime = NodeRuntime::new(config, telemetry)?;
    runtime.start().await?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;
    Ok(())
}
