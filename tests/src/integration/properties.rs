//! # Model-Based Properties
//!
//! Random operation sequences are applied both to the engine and to a plain
//! in-memory model of the decision rule; every address must agree after
//! every step.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    use proptest::prelude::*;
    use qc_18_address_restriction::{
        InMemoryKVStore, RestrictionApi, RestrictionConfig, RestrictionEngine, Status,
    };
    use shared_bus::InMemoryEventBus;
    use shared_types::{Address, BatchId};

    use crate::integration::{addr, stake, stake_params};

    const ADDRESSES: u8 = 4;
    const ALLOW_LISTED: u8 = 0;

    #[derive(Debug, Clone)]
    enum Op {
        Restrict(u8),
        Unrestrict(u8),
        Propose(u8, BatchId, bool),
        Resolve(BatchId),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..ADDRESSES).prop_map(Op::Restrict),
            (0..ADDRESSES).prop_map(Op::Unrestrict),
            (0..ADDRESSES, 1u64..8, any::<bool>()).prop_map(|(a, b, r)| Op::Propose(a, b, r)),
            (1u64..8).prop_map(Op::Resolve),
        ]
    }

    /// Reference model of the decision rule.
    #[derive(Default)]
    struct Model {
        permanent: BTreeSet<u8>,
        temporary: BTreeMap<u8, BTreeMap<BatchId, Status>>,
    }

    impl Model {
        fn apply(&mut self, op: &Op) {
            match *op {
                Op::Restrict(a) | Op::Propose(a, _, true) if a == ALLOW_LISTED => {}
                Op::Restrict(a) => {
                    self.permanent.insert(a);
                    self.temporary.remove(&a);
                }
                Op::Unrestrict(a) => {
                    self.permanent.remove(&a);
                    self.temporary.remove(&a);
                }
                Op::Propose(a, batch, restrict) => {
                    let status = if restrict {
                        Status::Restricted
                    } else {
                        Status::Unrestricted
                    };
                    self.temporary.entry(a).or_default().insert(batch, status);
                }
                Op::Resolve(batch) => {
                    for entries in self.temporary.values_mut() {
                        entries.remove(&batch);
                    }
                }
            }
        }

        fn is_restricted(&self, a: u8) -> bool {
            if a == ALLOW_LISTED {
                return false;
            }
            match self.temporary.get(&a).and_then(|e| e.iter().next_back()) {
                Some((_, status)) => status.is_restricted(),
                None => self.permanent.contains(&a),
            }
        }
    }

    fn address(i: u8) -> Address {
        addr(0x10 + i)
    }

    proptest! {
        #[test]
        fn prop_engine_matches_model(ops in proptest::collection::vec(op_strategy(), 0..60)) {
            let engine = RestrictionEngine::new(
                Arc::new(InMemoryKVStore::new()),
                RestrictionConfig::default().with_unrestrictable(vec![address(ALLOW_LISTED)]),
                Arc::new(InMemoryEventBus::new()),
            );
            let p = stake_params(1);
            let deposit = stake(1);
            let mut model = Model::default();

            for op in &ops {
                // Allow-list rejections leave both sides untouched
                let _ = match *op {
                    Op::Restrict(a) => engine.restrict(&[address(a)]),
                    Op::Unrestrict(a) => engine.unrestrict(&[address(a)]),
                    Op::Propose(a, b, true) => engine.propose_restrict(b, &[address(a)], &deposit, &p),
                    Op::Propose(a, b, false) => engine.propose_unrestrict(b, &[address(a)], &deposit, &p),
                    Op::Resolve(b) => engine.resolve_batch(b).map(|_| ()),
                };
                model.apply(op);

                for a in 0..ADDRESSES {
                    prop_assert_eq!(
                        engine.is_restricted(&address(a)).unwrap(),
                        model.is_restricted(a),
                        "address {} after {:?}", a, op
                    );
                }
            }
        }

        #[test]
        fn prop_batch_resolution_order_is_irrelevant(
            batches in proptest::collection::btree_map(1u64..50, any::<bool>(), 1..10),
            permanently_restricted in any::<bool>(),
            reverse in any::<bool>(),
        ) {
            let engine = RestrictionEngine::new(
                Arc::new(InMemoryKVStore::new()),
                RestrictionConfig::default(),
                Arc::new(InMemoryEventBus::new()),
            );
            let a = address(1);
            let p = stake_params(1);
            let deposit = stake(1);

            if permanently_restricted {
                engine.restrict(&[a.clone()]).unwrap();
            }
            for (&batch, &restrict) in &batches {
                if restrict {
                    engine.propose_restrict(batch, &[a.clone()], &deposit, &p).unwrap();
                } else {
                    engine.propose_unrestrict(batch, &[a.clone()], &deposit, &p).unwrap();
                }
            }

            let ids: Vec<BatchId> = if reverse {
                batches.keys().rev().copied().collect()
            } else {
                batches.keys().copied().collect()
            };
            for id in ids {
                engine.resolve_batch(id).unwrap();
            }

            prop_assert_eq!(engine.is_restricted(&a).unwrap(), permanently_restricted);
            prop_assert!(engine.check_invariants().unwrap().holds());
        }
    }
}
