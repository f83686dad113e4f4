//! # Failure Scenarios
//!
//! Every refusal must leave the store, the hint bus and the ledger as they
//! were, except that a reverted transaction still consumes its nonce.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, FEE_RECIPIENT};
    use cb_01_capability_store::{CapabilityStoreApi, StoreError};
    use cb_03_bundle_submitter::{BundleSubmitterApi, InvalidBundle, SubmitError};
    use cb_04_meta_bundle_aggregator::{AggregateError, MetaBundleAggregatorApi};
    use cb_05_match_engine::{MatchEngineApi, MatchError, MatchRequest};
    use cb_06_block_assembler::{AssembleError, BlockAssemblerApi};
    use shared_bus::EventFilter;
    use shared_crypto::Secp256k1KeyPair;
    use shared_ledger::CommitError;
    use shared_types::{
        Actor, Bundle, CapabilityGrant, Classified, ClearingTerms, DataReference, ErrorKind,
        PayloadKind, RevealCondition, Stage, U256,
    };

    #[tokio::test]
    async fn test_empty_aggregate_has_no_effect() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);
        let mut events = net.devnet.bus.subscribe(EventFilter::all());
        let block = net.devnet.ledger.block_number();
        let stored = net.devnet.store.len();

        let err = net
            .aggregator
            .aggregate(&net.key, &mut net.actor, &[], U256::from(1000), FEE_RECIPIENT, &grant)
            .await
            .unwrap_err();

        assert!(matches!(err, AggregateError::EmptyComposite));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.stage(), Stage::MetaBundleAggregator);
        assert!(events.drain().is_empty());
        assert_eq!(net.devnet.ledger.block_number(), block);
        assert_eq!(net.devnet.store.len(), stored);
    }

    #[tokio::test]
    async fn test_invalid_bundle_is_not_sent() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);
        let nonce = net.actor.nonce;

        let err = net
            .submitter
            .submit(&net.key, &mut net.actor, &Bundle::new(slot, vec![]), &grant)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::InvalidBundle {
                reason: InvalidBundle::Empty,
                ..
            }
        ));
        assert_eq!(net.actor.nonce, nonce);
        assert!(net.devnet.store.is_empty());
    }

    #[tokio::test]
    async fn test_bundle_slot_must_match_reveal() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let bundle = net.signed_bundle(slot, 1);
        let later = net.grant(slot + 1);

        let err = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &later)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_unfunded_submitter_fails_at_ledger() {
        let net = Network::start().await;
        let slot = net.next_slot().await;
        let stranger = Secp256k1KeyPair::generate();
        let mut actor = Actor::new(stranger.address(), 0);

        let err = net
            .submitter
            .submit(&stranger, &mut actor, &net.signed_bundle(slot, 1), &net.grant(slot))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Ledger);
        assert!(net.devnet.store.is_empty());
    }

    #[tokio::test]
    async fn test_underpaying_match_reverts_without_commit() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);
        let bundle = net.signed_bundle(slot, 1);
        let (child, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &grant)
            .await
            .unwrap();
        let (meta_ref, _) = net
            .aggregator
            .aggregate(&net.key, &mut net.actor, &[child], U256::from(1000), FEE_RECIPIENT, &grant)
            .await
            .unwrap();
        let stored = net.devnet.store.len();
        let nonce = net.actor.nonce;

        let short = ClearingTerms {
            value: U256::from(999),
            recipient: FEE_RECIPIENT,
        };
        let request = MatchRequest::new(meta_ref, net.payment(&short, slot), vec![]);
        let err = net
            .engine
            .match_meta_bundle(&net.key, &mut net.actor, request)
            .await
            .unwrap_err();

        assert!(matches!(err, MatchError::Commit(CommitError::Rejected { .. })));
        assert_eq!(err.kind(), ErrorKind::RejectedCommit);
        assert_eq!(net.devnet.store.len(), stored);
        assert_eq!(net.actor.nonce, nonce + 1);
        assert_eq!(net.devnet.ledger.stats().reverted, 1);
    }

    #[tokio::test]
    async fn test_match_of_bundle_reference_refused() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);
        let bundle = net.signed_bundle(slot, 1);
        let (bundle_ref, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &grant)
            .await
            .unwrap();
        let terms = ClearingTerms {
            value: U256::from(1),
            recipient: FEE_RECIPIENT,
        };
        let request = MatchRequest::new(bundle_ref, net.payment(&terms, slot), vec![]);

        let err = net
            .engine
            .match_meta_bundle(&net.key, &mut net.actor, request)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MatchError::NotAMetaBundle {
                kind: PayloadKind::Bundle,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreadable_reference_fails_build() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let hidden = net.signed_bundle(slot, 1);
        let (hidden_ref, _) = net.devnet.store.commit(
            hidden.to_payload().unwrap(),
            CapabilityGrant::new([[0xdd; 20]], RevealCondition(slot)),
            PayloadKind::Bundle,
        );
        let stored = net.devnet.store.len();

        let err = net
            .assembler
            .assemble(&net.key, &mut net.actor, slot, vec![hidden_ref])
            .await
            .unwrap_err();

        assert!(matches!(err, AssembleError::BuildFailed { .. }));
        assert_eq!(err.stage(), Stage::BlockAssembler);
        assert_eq!(net.devnet.store.len(), stored);
    }

    #[tokio::test]
    async fn test_unknown_child_refused_before_send() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let grant = net.grant(slot);
        let block = net.devnet.ledger.block_number();

        let err = net
            .aggregator
            .aggregate(
                &net.key,
                &mut net.actor,
                &[DataReference([0x42; 16])],
                U256::from(1),
                FEE_RECIPIENT,
                &grant,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownReference);
        assert_eq!(net.devnet.ledger.block_number(), block);
    }

    #[tokio::test]
    async fn test_direct_reads_follow_grant() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await + 10;
        let bundle = net.signed_bundle(slot, 1);
        let grant = net.grant(slot);
        let (data_ref, _) = net
            .submitter
            .submit(&net.key, &mut net.actor, &bundle, &grant)
            .await
            .unwrap();
        let store = &net.devnet.store;

        assert!(matches!(
            store.resolve(data_ref, [0xee; 20]),
            Err(StoreError::AccessDenied { .. })
        ));
        assert!(matches!(
            store.resolve(data_ref, net.key.address()),
            Err(StoreError::NotYetRevealable { .. })
        ));

        net.devnet.clock.advance_to(slot);
        let payload = store.resolve(data_ref, net.key.address()).unwrap();
        assert_eq!(Bundle::from_payload(&payload).unwrap(), bundle);
    }
}
