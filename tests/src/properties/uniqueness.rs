//! References are never reused, whatever kind of payload they name.

#[cfg(test)]
mod tests {
    use cb_01_capability_store::{CapabilityStore, CapabilityStoreApi, ManualSlotClock};
    use shared_bus::InMemoryEventBus;
    use shared_types::{CapabilityGrant, DataReference, MetaBundle, PayloadKind, RevealCondition, U256};
    use std::collections::HashSet;
    use std::sync::Arc;

    const COMMITS: usize = 1000;

    fn store() -> CapabilityStore {
        CapabilityStore::new(
            Arc::new(ManualSlotClock::new(0)),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn test_thousand_commits_yield_distinct_references() {
        let store = store();
        let kinds = [
            PayloadKind::Bundle,
            PayloadKind::Payment,
            PayloadKind::Match,
        ];

        let grant = CapabilityGrant::new([[1; 20]], RevealCondition(0));
        let mut refs: HashSet<DataReference> = HashSet::with_capacity(COMMITS);
        let mut meta_bundles = 0;
        let mut last = None;
        for n in 0..COMMITS {
            let payload = vec![(n % 7) as u8; 4];
            let data_ref = match last {
                Some(child) if n % 4 == 3 => {
                    meta_bundles += 1;
                    let meta_bundle = MetaBundle {
                        child_references: vec![child],
                        clearing_value: U256::from(1000),
                        fee_recipient: [2; 20],
                    };
                    store
                        .commit_meta_bundle(payload, grant.clone(), meta_bundle)
                        .hint
                        .data_ref
                }
                _ => store.commit(payload, grant.clone(), kinds[n % kinds.len()]).0,
            };
            refs.insert(data_ref);
            last = Some(data_ref);
        }

        assert_eq!(meta_bundles, COMMITS / 4);
        assert_eq!(refs.len(), COMMITS);
        assert_eq!(store.len(), COMMITS);
    }

    #[test]
    fn test_identical_payloads_get_fresh_references() {
        let store = store();
        let grant = CapabilityGrant::new([[1; 20]], RevealCondition(0));

        let (first, _) = store.commit(b"same".to_vec(), grant.clone(), PayloadKind::Bundle);
        let (second, _) = store.commit(b"same".to_vec(), grant, PayloadKind::Bundle);

        assert_ne!(first, second);
    }

    #[test]
    fn test_bids_do_not_collide_with_payloads() {
        let store = store();
        let grant = CapabilityGrant::new([[1; 20]], RevealCondition(0));

        let mut refs = HashSet::new();
        for n in 0..100u8 {
            refs.insert(store.commit(vec![n], grant.clone(), PayloadKind::Bundle).0);
            refs.insert(store.commit_bid(vec![n], grant.clone()).data_ref);
        }

        assert_eq!(refs.len(), 200);
    }
}
