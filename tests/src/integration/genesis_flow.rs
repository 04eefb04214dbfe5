//! # Genesis Flows
//!
//! State exported from one node is imported into a fresh one and must
//! answer every query identically.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use node_runtime::genesis::{GenesisBalance, NodeGenesis};
    use node_runtime::{NodeConfig, NodeContainer};
    use qc_18_address_restriction::{
        export_genesis, RestrictionApi, RestrictionConfig, RestrictionQueryApi,
    };

    use crate::integration::{addr, stake, stake_params};

    fn container() -> NodeContainer {
        NodeContainer::new(NodeConfig {
            restriction: RestrictionConfig::default().with_unrestrictable(vec![addr(0xEE)]),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_export_then_import_preserves_state() {
        let source = container();
        let deposit = stake(10);
        let p = stake_params(10);
        source.engine.set_params(&p).unwrap();
        source.engine.restrict(&[addr(1), addr(2)]).unwrap();
        source
            .engine
            .propose_unrestrict(5, &[addr(2)], &deposit, &p)
            .unwrap();
        source
            .engine
            .propose_restrict(6, &[addr(3)], &deposit, &p)
            .unwrap();

        let genesis = NodeGenesis {
            restriction: export_genesis(&source.engine).unwrap(),
            balances: vec![GenesisBalance {
                address: addr(1),
                coins: stake(1_000),
            }],
        };
        let json = serde_json::to_string(&genesis).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let loaded = NodeGenesis::load(file.path()).unwrap();

        let target = container();
        assert!(loaded
            .apply(&target.store, &target.engine, &target.ledger)
            .unwrap());

        for b in [1, 2, 3, 4, 0xEE] {
            assert_eq!(
                target.engine.is_restricted(&addr(b)).unwrap(),
                source.engine.is_restricted(&addr(b)).unwrap(),
                "address {b:#x}"
            );
        }
        assert_eq!(target.engine.get_params().unwrap(), p);
        assert_eq!(
            target.engine.proposal_index_entries(None).unwrap(),
            source.engine.proposal_index_entries(None).unwrap()
        );
        assert_eq!(target.ledger.balance(&addr(1)), stake(1_000));
        assert!(target.engine.check_invariants().unwrap().holds());
    }

    #[test]
    fn test_genesis_restricting_module_account_is_rejected() {
        let json = format!(
            r#"{{"restriction":{{"restricted_addresses":["{}"]}}}}"#,
            addr(0xEE)
        );
        let genesis: NodeGenesis = serde_json::from_str(&json).unwrap();

        let target = container();
        assert!(genesis
            .apply(&target.store, &target.engine, &target.ledger)
            .is_err());
        assert!(target.engine.restricted_addresses().unwrap().is_empty());
    }
}
