//! # Ledger Enforcement Flows
//!
//! Builds the full node container and checks that the transfer guard is
//! enforced on the ledger's hook chain.
//!
//! ## Flows Tested:
//!
//! 1. Provisional restriction blocks outgoing transfers, rejection lifts it
//! 2. Allow-listed module account keeps sending while governance targets it
//! 3. Denials are published on the transfer topic
//! 4. Bypass context moves funds out of a restricted account

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::timeout;

    use node_runtime::adapters::LedgerError;
    use node_runtime::{NodeConfig, NodeContainer};
    use qc_18_address_restriction::{
        BatchAction, BatchOutcome, RestrictionApi, RestrictionConfig, RestrictionError,
        TransferGuardError,
    };
    use shared_bus::{BlockchainEvent, EventFilter, EventTopic};
    use shared_types::ExecutionContext;

    use crate::integration::{addr, stake, stake_params};

    fn module_account() -> shared_types::Address {
        addr(0xEE)
    }

    fn container() -> NodeContainer {
        NodeContainer::new(NodeConfig {
            restriction: RestrictionConfig::default()
                .with_unrestrictable(vec![module_account()])
                .with_default_params(stake_params(50)),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_provisional_restriction_blocks_until_rejected() {
        let c = container();
        let ctx = ExecutionContext::new();
        c.ledger.mint(&addr(1), &stake(100)).unwrap();

        c.governance
            .submit(7, stake(50), vec![BatchAction::Restrict(vec![addr(1)])]);
        c.governance_hooks.after_batch_submitted(7).unwrap();

        let err = c
            .ledger
            .transfer(&ctx, &addr(1), &addr(2), &stake(10))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Denied(TransferGuardError::RestrictedAccount { .. })
        ));

        c.governance_hooks
            .after_batch_concluded(7, BatchOutcome::Rejected)
            .unwrap();
        c.ledger.transfer(&ctx, &addr(1), &addr(2), &stake(10)).unwrap();
        assert_eq!(c.ledger.balance(&addr(2)), stake(10));
    }

    #[test]
    fn test_module_account_cannot_be_restricted() {
        let c = container();
        c.ledger.mint(&module_account(), &stake(100)).unwrap();

        c.governance.submit(
            8,
            stake(50),
            vec![BatchAction::Restrict(vec![module_account()])],
        );
        let err = c.governance_hooks.after_batch_submitted(8).unwrap_err();
        assert!(matches!(err, RestrictionError::AllowListedAddress { .. }));

        c.ledger
            .transfer(
                &ExecutionContext::new(),
                &module_account(),
                &addr(3),
                &stake(100),
            )
            .unwrap();
    }

    #[tokio::test]
    async fn test_denials_reach_transfer_subscribers() {
        let c = container();
        let mut denials = c
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Transfer]));
        c.ledger.mint(&addr(4), &stake(1)).unwrap();
        c.engine.restrict(&[addr(4)]).unwrap();

        let _ = c
            .ledger
            .transfer(&ExecutionContext::new(), &addr(4), &addr(5), &stake(1));

        let event = timeout(Duration::from_millis(100), denials.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(event, BlockchainEvent::TransferDenied { address: addr(4) });
    }

    #[test]
    fn test_bypass_moves_restricted_funds() {
        let c = container();
        c.ledger.mint(&addr(6), &stake(30)).unwrap();
        c.engine.restrict(&[addr(6)]).unwrap();

        let escrow = ExecutionContext::new().with_bypass();
        c.ledger
            .transfer(&escrow, &addr(6), &module_account(), &stake(30))
            .unwrap();

        assert!(c.ledger.balance(&addr(6)).is_empty());
        assert_eq!(c.ledger.balance(&module_account()), stake(30));
        // The bypass was scoped to that one call
        assert!(c
            .ledger
            .transfer(&ExecutionContext::new(), &addr(6), &addr(7), &stake(0))
            .is_err());
    }
}
