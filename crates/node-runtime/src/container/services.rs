//! # Service Container
//!
//! Holds all runtime services and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Event Bus
//!     ↓
//! NodeStore ──→ RestrictionEngine ──→ TransferGuard ──→ InMemoryLedger
//!                      ↓
//!               GovernanceHooks ←── InMemoryGovernance
//! ```
//!
//! ## Thread Safety
//!
//! - All services wrapped in `Arc` for shared ownership
//! - Services synchronize internally; none needs an outer lock

use std::sync::Arc;

use tracing::{info, instrument};

use qc_18_address_restriction::{
    GovernanceHooks, InMemoryGovernance, KVStoreError, RestrictionEngine, TransferGuard,
};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};

use crate::adapters::{InMemoryLedger, NodeStore};
use crate::container::config::NodeConfig;

/// Restriction engine over the node's configured store.
pub type NodeEngine = RestrictionEngine<NodeStore>;

/// Governance hooks over the node's engine and lifecycle.
pub type NodeGovernanceHooks = GovernanceHooks<NodeStore, InMemoryGovernance>;

/// Central container holding all runtime services.
pub struct NodeContainer {
    /// Event bus carrying restriction events to observers.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Durable key-value store backing the engine.
    pub store: Arc<NodeStore>,

    /// Restriction engine (permanent set, provisional entries, params).
    pub engine: Arc<NodeEngine>,

    /// Governance batch lifecycle.
    pub governance: Arc<InMemoryGovernance>,

    /// Hooks the lifecycle calls on submit, deposit and conclusion.
    pub governance_hooks: Arc<NodeGovernanceHooks>,

    /// Ledger with the transfer guard registered.
    pub ledger: Arc<InMemoryLedger>,

    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
}

impl NodeContainer {
    /// Open storage and build every service.
    #[instrument(skip(config), fields(rocksdb = config.storage.use_rocksdb))]
    pub fn new(config: NodeConfig) -> Result<Self, KVStoreError> {
        let event_bus = Arc::new(InMemoryEventBus::new());
        let store = Arc::new(NodeStore::open(&config.storage)?);

        let engine = Arc::new(RestrictionEngine::new(
            Arc::clone(&store),
            config.restriction.clone(),
            event_bus.clone(),
        ));
        info!(
            allow_listed = engine.allow_list().len(),
            "Restriction services wired"
        );

        let governance = Arc::new(InMemoryGovernance::new());
        let governance_hooks = Arc::new(GovernanceHooks::new(
            Arc::clone(&engine),
            Arc::clone(&governance),
        ));

        let guard = Arc::new(TransferGuard::new(Arc::clone(&engine)));
        let ledger = Arc::new(InMemoryLedger::new(event_bus.clone()).with_hook(guard));
        info!("Transfer guard registered as pre-transfer hook");

        Ok(Self {
            event_bus,
            store,
            engine,
            governance,
            governance_hooks,
            ledger,
            config,
        })
    }

    /// Subscribe to every restriction event.
    pub fn subscribe_all(&self) -> Subscription {
        self.event_bus.subscribe(EventFilter::all())
    }
}
