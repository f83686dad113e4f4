//! Building the same references always yields the same transaction order,
//! and that order is the reference order with meta-bundles expanded in
//! place.

#[cfg(test)]
mod tests {
    use crate::harness::{Network, FEE_RECIPIENT};
    use cb_03_bundle_submitter::BundleSubmitterApi;
    use cb_04_meta_bundle_aggregator::MetaBundleAggregatorApi;
    use cb_06_block_assembler::BlockAssemblerApi;
    use shared_types::{Bundle, DataReference, Hash, U256};

    async fn submit_all(net: &mut Network, slot: u64, bundles: &[Bundle]) -> Vec<DataReference> {
        let grant = net.grant(slot);
        let mut refs = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            let (data_ref, _) = net
                .submitter
                .submit(&net.key, &mut net.actor, bundle, &grant)
                .await
                .unwrap();
            refs.push(data_ref);
        }
        refs
    }

    async fn built_order(net: &mut Network, slot: u64, refs: Vec<DataReference>) -> Vec<Hash> {
        net.assembler
            .assemble(&net.key, &mut net.actor, slot, refs)
            .await
            .unwrap()
            .block()
            .unwrap()
            .transaction_hashes()
            .unwrap()
    }

    fn hashes(bundles: &[&Bundle]) -> Vec<Hash> {
        bundles
            .iter()
            .flat_map(|b| b.transactions.iter().map(|tx| tx.hash().unwrap()))
            .collect()
    }

    #[tokio::test]
    async fn test_every_permutation_builds_in_given_order() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let bundles: Vec<_> = (1..=3).map(|size| net.signed_bundle(slot, size)).collect();
        let refs = submit_all(&mut net, slot, &bundles).await;

        let permutations = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for order in permutations {
            let ordered: Vec<_> = order.iter().map(|&i| refs[i]).collect();
            let expected = hashes(&order.map(|i| &bundles[i]));

            assert_eq!(built_order(&mut net, slot, ordered).await, expected);
        }
    }

    #[tokio::test]
    async fn test_rebuilding_is_idempotent() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let bundles = vec![net.signed_bundle(slot, 2), net.signed_bundle(slot, 2)];
        let refs = submit_all(&mut net, slot, &bundles).await;

        let first = built_order(&mut net, slot, refs.clone()).await;
        let second = built_order(&mut net, slot, refs).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_nested_meta_bundles_expand_depth_first() {
        let mut net = Network::start().await;
        let slot = net.next_slot().await;
        let bundles: Vec<_> = (0..3).map(|_| net.signed_bundle(slot, 1)).collect();
        let refs = submit_all(&mut net, slot, &bundles).await;
        let grant = net.grant(slot);

        let (inner, _) = net
            .aggregator
            .aggregate(
                &net.key,
                &mut net.actor,
                &[refs[1], refs[0]],
                U256::from(1),
                FEE_RECIPIENT,
                &grant,
            )
            .await
            .unwrap();
        let (outer, _) = net
            .aggregator
            .aggregate(
                &net.key,
                &mut net.actor,
                &[refs[2], inner],
                U256::from(2),
                FEE_RECIPIENT,
                &grant,
            )
            .await
            .unwrap();

        let order = built_order(&mut net, slot, vec![outer]).await;

        assert_eq!(order, hashes(&[&bundles[2], &bundles[1], &bundles[0]]));
    }
}
