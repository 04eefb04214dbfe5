//! # Governance Batch Flows
//!
//! Drives the restriction engine through the governance hooks the way the
//! lifecycle would, observing results through the shared event bus.
//!
//! ## Flows Tested:
//!
//! 1. **Submit → Passed**: provisional entry, then permanent restriction and cleanup
//! 2. **Deposit top-up**: threshold reached on a later deposit
//! 3. **Competing batches**: latest batch decides, cleanup falls back
//! 4. **Rejected unrestrict**: permanent restriction survives

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use qc_18_address_restriction::{
        BatchAction, BatchOutcome, GovernanceHooks, InMemoryGovernance, InMemoryKVStore,
        RestrictionApi, RestrictionConfig, RestrictionEngine, RestrictionQueryApi, Status,
    };
    use shared_bus::{BlockchainEvent, EventFilter, EventTopic, InMemoryEventBus, Subscription};

    use crate::integration::{addr, stake, stake_params};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Node {
        bus: Arc<InMemoryEventBus>,
        engine: Arc<RestrictionEngine<InMemoryKVStore>>,
        governance: Arc<InMemoryGovernance>,
        hooks: GovernanceHooks<InMemoryKVStore, InMemoryGovernance>,
    }

    fn node() -> Node {
        let bus = Arc::new(InMemoryEventBus::new());
        let engine = Arc::new(RestrictionEngine::new(
            Arc::new(InMemoryKVStore::new()),
            RestrictionConfig::default().with_default_params(stake_params(100)),
            bus.clone(),
        ));
        let governance = Arc::new(InMemoryGovernance::new());
        let hooks = GovernanceHooks::new(engine.clone(), governance.clone());
        Node {
            bus,
            engine,
            governance,
            hooks,
        }
    }

    async fn next(sub: &mut Subscription) -> BlockchainEvent {
        timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event")
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_passed_batch_restricts_permanently() {
        let n = node();
        let mut sub = n.bus.subscribe(EventFilter::topics(vec![
            EventTopic::Restriction,
            EventTopic::Provisional,
            EventTopic::Governance,
        ]));

        n.governance
            .submit(1, stake(100), vec![BatchAction::Restrict(vec![addr(1)])]);
        n.hooks.after_batch_submitted(1).unwrap();

        assert_eq!(
            next(&mut sub).await,
            BlockchainEvent::ProvisionalRestricted {
                address: addr(1),
                batch_id: 1
            }
        );
        assert!(n.engine.is_restricted(&addr(1)).unwrap());

        let removed = n
            .hooks
            .after_batch_concluded(1, BatchOutcome::Passed)
            .unwrap();

        // Execution purged the address's entry, so cleanup finds nothing left
        assert_eq!(removed, 0);
        assert_eq!(
            next(&mut sub).await,
            BlockchainEvent::AddressRestricted { address: addr(1) }
        );
        assert_eq!(
            next(&mut sub).await,
            BlockchainEvent::BatchResolved {
                batch_id: 1,
                entries_removed: 0
            }
        );
        assert!(n.engine.is_restricted(&addr(1)).unwrap());
        assert_eq!(n.engine.restricted_addresses().unwrap(), vec![addr(1)]);
        assert!(n.engine.temporary_entries(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deposit_top_up_reaches_threshold() {
        let n = node();
        let mut sub = n.bus.subscribe(EventFilter::topics(vec![EventTopic::Provisional]));

        n.governance
            .submit(4, stake(60), vec![BatchAction::Restrict(vec![addr(2)])]);
        n.hooks.after_batch_submitted(4).unwrap();
        assert!(!n.engine.is_restricted(&addr(2)).unwrap());
        assert_eq!(sub.try_recv(), Ok(None));

        n.governance.add_deposit(4, &stake(40)).unwrap();
        n.hooks.after_batch_deposit(4).unwrap();

        assert!(n.engine.is_restricted(&addr(2)).unwrap());
        assert_eq!(
            next(&mut sub).await,
            BlockchainEvent::ProvisionalRestricted {
                address: addr(2),
                batch_id: 4
            }
        );

        // A further deposit rewrites the same entry
        n.governance.add_deposit(4, &stake(10)).unwrap();
        n.hooks.after_batch_deposit(4).unwrap();
        assert_eq!(n.engine.proposal_index_entries(Some(4)).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_competing_batches_latest_wins() {
        let n = node();
        let a = addr(3);

        n.governance
            .submit(10, stake(100), vec![BatchAction::Restrict(vec![a.clone()])]);
        n.governance
            .submit(11, stake(100), vec![BatchAction::Unrestrict(vec![a.clone()])]);
        n.hooks.after_batch_submitted(10).unwrap();
        n.hooks.after_batch_submitted(11).unwrap();

        assert!(!n.engine.is_restricted(&a).unwrap());
        assert_eq!(
            n.engine.latest_temporary_entry(&a).unwrap(),
            Some((11, Status::Unrestricted))
        );

        n.hooks
            .after_batch_concluded(11, BatchOutcome::Rejected)
            .unwrap();
        assert!(n.engine.is_restricted(&a).unwrap());

        n.hooks
            .after_batch_concluded(10, BatchOutcome::Expired)
            .unwrap();
        assert!(!n.engine.is_restricted(&a).unwrap());
        assert!(n.engine.check_invariants().unwrap().holds());
    }

    #[tokio::test]
    async fn test_rejected_unrestrict_keeps_permanent_restriction() {
        let n = node();
        let a = addr(4);
        n.engine.restrict(&[a.clone()]).unwrap();

        n.governance
            .submit(20, stake(100), vec![BatchAction::Unrestrict(vec![a.clone()])]);
        n.hooks.after_batch_submitted(20).unwrap();
        assert!(!n.engine.is_restricted(&a).unwrap());

        let removed = n
            .hooks
            .after_batch_concluded(20, BatchOutcome::Rejected)
            .unwrap();
        assert_eq!(removed, 1);
        assert!(n.engine.is_restricted(&a).unwrap());
    }

    #[tokio::test]
    async fn test_batch_concluding_twice_is_harmless() {
        let n = node();
        n.governance
            .submit(30, stake(100), vec![BatchAction::Restrict(vec![addr(5)])]);
        n.hooks.after_batch_submitted(30).unwrap();

        n.hooks
            .after_batch_concluded(30, BatchOutcome::Rejected)
            .unwrap();
        assert_eq!(
            n.hooks
                .after_batch_concluded(30, BatchOutcome::Rejected)
                .unwrap(),
            0
        );
        assert!(!n.engine.is_restricted(&addr(5)).unwrap());
    }
}
