//! # End-to-End Pipeline
//!
//! ```text
//! [Submitter] b1, b2 ──HintEvent──→ [Aggregator] m ──MetaBundleHint──→ [Match Engine] mm
//!                                                                          │
//!                                                                          ↓
//!                                            bid ←──NewBuilderBidEvent── [Assembler]
//! ```
//!
//! The bid envelope must contain b1's transactions, then b2's, then the
//! clearing payment.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, FEE_RECIPIENT};
    use cb_01_capability_store::CapabilityStoreApi;
    use cb_03_bundle_submitter::BundleSubmitterApi;
    use cb_04_meta_bundle_aggregator::MetaBundleAggregatorApi;
    use cb_05_match_engine::{MatchEngineApi, MatchRequest};
    use cb_06_block_assembler::BlockAssemblerApi;
    use shared_bus::{EventFilter, EventTopic};
    use shared_types::{Bundle, PayloadKind, RevealCondition, U256};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_bundles_to_bid() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let mut events = net.devnet.bus.subscribe(EventFilter::all());
        let grant = net.grant(slot);

        // Submit two bundles
        let b1 = net.signed_bundle(slot, 2);
        let b2 = net.signed_bundle(slot, 1);
        let (r1, h1) = net
            .submitter
            .submit(&net.key, &mut net.actor, &b1, &grant)
            .await
            .unwrap();
        let (r2, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &b2, &grant)
            .await
            .unwrap();
        assert_eq!(h1.kind, PayloadKind::Bundle);
        assert_eq!(h1.reveal_condition(), RevealCondition(slot));

        // Aggregate 1000 to A
        let (m, meta_hint) = net
            .aggregator
            .aggregate(
                &net.key,
                &mut net.actor,
                &[r1, r2],
                U256::from(1000),
                FEE_RECIPIENT,
                &grant,
            )
            .await
            .unwrap();
        assert_eq!(meta_hint.meta_bundle.child_references, vec![r1, r2]);
        assert_eq!(meta_hint.meta_bundle.clearing_value, U256::from(1000));

        // Match with a payment meeting the terms
        let payment = net.payment(&meta_hint.meta_bundle.clearing_terms(), slot);
        let (mm, match_hint) = net
            .engine
            .match_meta_bundle(
                &net.key,
                &mut net.actor,
                MatchRequest::from_hint(&meta_hint, payment.clone(), vec![]),
            )
            .await
            .unwrap();
        assert!(match_hint.grant.is_superset_of(&meta_hint.hint.grant));

        // Assemble
        let bid = net
            .assembler
            .assemble(&net.key, &mut net.actor, slot, vec![mm])
            .await
            .unwrap();

        let ids: HashSet<_> = [r1, r2, m, mm, bid.data_ref].into_iter().collect();
        assert_eq!(ids.len(), 5);

        let block = bid.block().unwrap();
        let expected: Vec<_> = [&b1, &b2, &payment]
            .into_iter()
            .flat_map(|bundle: &Bundle| bundle.transactions.clone())
            .collect();
        assert_eq!(block.transactions, expected);
        assert_eq!(block.slot, slot);
        assert_eq!(block.fee_recipient, FEE_RECIPIENT);
        assert_eq!(block.value, U256::from(1000));

        let topics: Vec<_> = events.drain().iter().map(|e| e.topic()).collect();
        assert_eq!(
            topics,
            vec![
                EventTopic::Bundle,
                EventTopic::Bundle,
                EventTopic::MetaBundle,
                EventTopic::Payment,
                EventTopic::Match,
                EventTopic::Bid,
            ]
        );
    }

    #[tokio::test]
    async fn test_builder_reads_everything_it_expands() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);

        let bundle = net.signed_bundle(slot, 1);
        let (r1, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &grant)
            .await
            .unwrap();
        let (m, _) = net
            .aggregator
            .aggregate(&net.key, &mut net.actor, &[r1], U256::from(5), FEE_RECIPIENT, &grant)
            .await
            .unwrap();

        let store = &net.devnet.store;
        for data_ref in [r1, m] {
            assert!(store.resolve_at(data_ref, net.builder, slot).is_ok());
            assert!(store.resolve_at(data_ref, net.key.address(), slot).is_ok());
        }
        assert!(store.resolve_at(m, net.meta, slot).is_ok());
    }

    #[tokio::test]
    async fn test_standalone_bundles_build_without_match() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);

        let first = net.signed_bundle(slot, 1);
        let second = net.signed_bundle(slot, 2);
        let (r1, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &first, &grant)
            .await
            .unwrap();
        let (r2, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &second, &grant)
            .await
            .unwrap();

        let bid = net
            .assembler
            .assemble(&net.key, &mut net.actor, slot, vec![r2, r1])
            .await
            .unwrap();

        let block = bid.block().unwrap();
        let expected: Vec<_> = second
            .transactions
            .iter()
            .chain(&first.transactions)
            .cloned()
            .collect();
        assert_eq!(block.transactions, expected);
        assert_eq!(block.value, U256::zero());
    }
}
