//! Grants only widen along the pipeline: whoever could read a meta-bundle
//! can read its match and payment, and a commit never narrows what a
//! caller asked for.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, FEE_RECIPIENT};
    use cb_01_capability_store::CapabilityStoreApi;
    use cb_03_bundle_submitter::BundleSubmitterApi;
    use cb_04_meta_bundle_aggregator::MetaBundleAggregatorApi;
    use cb_05_match_engine::{MatchEngineApi, MatchRequest};
    use proptest::prelude::*;
    use shared_types::{Address, CapabilityGrant, DataReference, MatchRecord, RevealCondition, U256};

    /// Match a fresh meta-bundle readable by `viewers`, adding `extra`.
    async fn matched(
        viewers: Vec<Address>,
        extra: Vec<Address>,
    ) -> (Network, DataReference, CapabilityGrant, CapabilityGrant) {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = CapabilityGrant::new(viewers, RevealCondition(slot));

        let bundle = net.signed_bundle(slot, 1);
        let (child, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &grant)
            .await
            .unwrap();
        let (_, meta) = net
            .aggregator
            .aggregate(&net.key, &mut net.actor, &[child], U256::from(7), FEE_RECIPIENT, &grant)
            .await
            .unwrap();
        let payment = net.payment(&meta.meta_bundle.clearing_terms(), slot);
        let request = MatchRequest::from_hint(&meta, payment, extra);
        let (match_ref, hint) = net
            .engine
            .match_meta_bundle(&net.key, &mut net.actor, request)
            .await
            .unwrap();
        (net, match_ref, meta.hint.grant, hint.grant)
    }

    fn addresses() -> impl Strategy<Value = Vec<Address>> {
        prop::collection::vec(any::<[u8; 20]>(), 0..4)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_match_grant_covers_meta_viewers(viewers in addresses(), extra in addresses()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let (_, _, meta_grant, match_grant) =
                runtime.block_on(matched(viewers.clone(), extra.clone()));

            prop_assert!(match_grant.is_superset_of(&meta_grant));
            for address in viewers.iter().chain(&extra) {
                prop_assert!(match_grant.is_viewer(address));
            }
            prop_assert_eq!(match_grant.reveal_condition(), meta_grant.reveal_condition());
        }
    }

    #[tokio::test]
    async fn test_payment_readable_by_meta_viewers() {
        let viewer = [0x5a; 20];
        let (net, match_ref, meta_grant, _) = matched(vec![viewer], vec![]).await;
        let slot = meta_grant.reveal_condition().0;
        let store = &net.devnet.store;

        let record =
            MatchRecord::from_payload(&store.resolve_at(match_ref, viewer, slot).unwrap()).unwrap();

        for reader in meta_grant.viewers() {
            assert!(store.resolve_at(record.payment_ref, *reader, slot).is_ok());
            assert!(store.resolve_at(record.meta_bundle_ref, *reader, slot).is_ok());
        }
    }
}
