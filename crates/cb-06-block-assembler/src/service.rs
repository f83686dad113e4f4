//! Block Assembler Service
//!
//! 1. Read the latest header and derive the build request
//! 2. Call `BlockBuilder.build` once with the ordered references
//! 3. Decode the bid event and check the envelope is readable

use crate::config::AssemblerConfig;
use crate::domain::{AssembleError, Collecting, Ordered, SlotAssembly, SlotOutcome};
use crate::ports::BlockAssemblerApi;
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_ledger::ContractClient;
use shared_types::{Actor, Bid, ContractCall, Hash, NewBuilderBidEvent};
use tracing::{debug, info, warn};

/// Block Assembler bound to a deployed BlockBuilder contract.
pub struct BlockAssembler {
    contract: ContractClient,
    config: AssemblerConfig,
}

impl BlockAssembler {
    /// Create an assembler calling `contract`.
    pub fn new(contract: ContractClient, config: AssemblerConfig) -> Self {
        Self { contract, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    async fn build(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        call: &ContractCall,
        slot: u64,
    ) -> Result<(Bid, Hash), AssembleError> {
        let receipt = self
            .contract
            .send(key, actor, call, Vec::new())
            .await
            .map_err(|e| AssembleError::from_commit(slot, e))?;
        let bid = self
            .contract
            .decode_event::<NewBuilderBidEvent>(&receipt)
            .map_err(|e| AssembleError::from_commit(slot, e))?
            .into_bid();
        bid.block().map_err(|source| AssembleError::MalformedBid {
            slot,
            tx_hash: receipt.tx_hash,
            source,
        })?;
        Ok((bid, receipt.tx_hash))
    }
}

#[async_trait]
impl BlockAssemblerApi for BlockAssembler {
    async fn prepare(
        &self,
        slot: SlotAssembly<Collecting>,
    ) -> Result<SlotAssembly<Ordered>, AssembleError> {
        let target_slot = slot.target_slot();
        let parent = self
            .contract
            .ledger()
            .header_by_number(None)
            .await
            .map_err(|source| AssembleError::ParentUnavailable {
                slot: target_slot,
                source,
            })?;
        debug!(
            slot = target_slot,
            parent = parent.number,
            references = slot.references().len(),
            "Ordering slot"
        );
        slot.order(&parent, &self.config)
    }

    async fn submit(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        slot: SlotAssembly<Ordered>,
    ) -> SlotOutcome {
        let slot = slot.submit();
        let request = slot.request();
        let target_slot = request.target_slot;
        let call = ContractCall::Build {
            slot: target_slot,
            build_args: request.build_args(),
            allowed_peekers: self.config.allowed_peekers.clone(),
            extra_peekers: self.config.extra_peekers.clone(),
            data_ids: request.ordered_references.clone(),
        };

        match self.build(key, actor, &call, target_slot).await {
            Ok((bid, tx_hash)) => {
                info!(
                    slot = target_slot,
                    bid = %bid.data_ref,
                    tx_hash = %hex::encode(tx_hash),
                    relay = %self.config.builder_endpoint,
                    "Bid issued"
                );
                SlotOutcome::Confirmed(slot.confirm(bid, tx_hash))
            }
            Err(error) => {
                warn!(slot = target_slot, error = %error, "Slot assembly failed");
                SlotOutcome::Rejected(slot.reject(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_01_capability_store::{CapabilityStoreApi, ReferenceDirectory};
    use cb_02_settlement::{Devnet, SettlementConfig};
    use shared_crypto::sign_request;
    use shared_ledger::deploy_contract;
    use shared_types::{
        Address, Bundle, CapabilityGrant, Classified, ContractKind, DataReference, ErrorKind,
        PayloadKind, RevealCondition, TransactionRequest, TRANSFER_GAS, U256,
    };

    const FEE_RECIPIENT: Address = [0xfe; 20];

    struct Fixture {
        devnet: Devnet,
        assembler: BlockAssembler,
        builder: Address,
        key: Secp256k1KeyPair,
        actor: Actor,
    }

    async fn setup() -> Fixture {
        let devnet = Devnet::start(SettlementConfig::default());
        let key = Secp256k1KeyPair::generate();
        devnet.ledger.fund_genesis(key.address(), U256::exp10(18));
        let mut actor = Actor::new(key.address(), 0);
        let builder =
            deploy_contract(&devnet.client(), &key, &mut actor, ContractKind::BlockBuilder)
                .await
                .unwrap();
        let assembler = BlockAssembler::new(
            ContractClient::new(devnet.client(), builder, ContractKind::BlockBuilder),
            AssemblerConfig {
                fee_recipient: FEE_RECIPIENT,
                allowed_peekers: vec![[0xa1; 20]],
                ..AssemblerConfig::default()
            },
        );
        Fixture {
            devnet,
            assembler,
            builder,
            key,
            actor,
        }
    }

    fn commit_bundle(f: &Fixture, slot: u64, viewer: Address) -> (DataReference, Bundle) {
        let sender = Secp256k1KeyPair::generate();
        let tx = sign_request(
            &sender,
            Actor::new(sender.address(), 0),
            TransactionRequest::transfer(FEE_RECIPIENT, U256::from(25)),
            U256::one(),
            TRANSFER_GAS,
        )
        .unwrap()
        .0;
        let bundle = Bundle::new(slot, vec![tx]);
        let (data_ref, _) = f.devnet.store.commit(
            bundle.to_payload().unwrap(),
            CapabilityGrant::new([viewer], RevealCondition(slot)),
            PayloadKind::Bundle,
        );
        (data_ref, bundle)
    }

    #[tokio::test]
    async fn test_assemble_issues_bid() {
        let mut f = setup().await;
        let (first, b1) = commit_bundle(&f, 3, f.builder);
        let (second, b2) = commit_bundle(&f, 3, f.builder);

        let bid = f
            .assembler
            .assemble(&f.key, &mut f.actor, 3, vec![first, second])
            .await
            .unwrap();

        assert_eq!(bid.reveal_condition(), RevealCondition(3));
        assert!(bid.grant.is_viewer(&[0xa1; 20]));
        assert_eq!(f.devnet.store.kind_of(&bid.data_ref), Some(PayloadKind::Bid));

        let block = bid.block().unwrap();
        let expected: Vec<_> = b1.transactions.into_iter().chain(b2.transactions).collect();
        assert_eq!(block.transactions, expected);
        assert_eq!(block.fee_recipient, FEE_RECIPIENT);
        assert_eq!(block.value, U256::from(50));
    }

    #[tokio::test]
    async fn test_build_request_follows_parent() {
        let f = setup().await;
        let parent = f.devnet.client().header_by_number(None).await.unwrap();

        let ordered = f
            .assembler
            .prepare(SlotAssembly::with_references(5, vec![DataReference([1; 16])]))
            .await
            .unwrap();

        assert_eq!(ordered.request().parent_hash, parent.hash);
        assert_eq!(ordered.request().timestamp, parent.timestamp + 12);
        assert_eq!(ordered.request().gas_limit, parent.gas_limit);
    }

    #[tokio::test]
    async fn test_unreadable_reference_rejects_slot() {
        let mut f = setup().await;
        let (hidden, _) = commit_bundle(&f, 3, [0xdd; 20]);

        let ordered = f
            .assembler
            .prepare(SlotAssembly::with_references(3, vec![hidden]))
            .await
            .unwrap();
        let outcome = f.assembler.submit(&f.key, &mut f.actor, ordered).await;

        let SlotOutcome::Rejected(rejected) = outcome else {
            panic!("slot should be rejected");
        };
        assert!(matches!(rejected.error(), AssembleError::BuildFailed { slot: 3, .. }));
        assert_eq!(rejected.error().kind(), ErrorKind::RejectedCommit);
        assert_eq!(rejected.retry().references(), &[hidden]);
    }

    #[tokio::test]
    async fn test_empty_slot_sends_nothing() {
        let mut f = setup().await;
        let before = f.devnet.ledger.block_number();

        let err = f
            .assembler
            .assemble(&f.key, &mut f.actor, 3, vec![])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(f.devnet.ledger.block_number(), before);
    }

    #[tokio::test]
    async fn test_same_references_same_order() {
        let mut f = setup().await;
        let refs: Vec<_> = (0..3).map(|_| commit_bundle(&f, 4, f.builder).0).collect();

        let first = f
            .assembler
            .assemble(&f.key, &mut f.actor, 4, refs.clone())
            .await
            .unwrap();
        let second = f
            .assembler
            .assemble(&f.key, &mut f.actor, 4, refs)
            .await
            .unwrap();

        assert_ne!(first.data_ref, second.data_ref);
        assert_eq!(
            first.block().unwrap().transaction_hashes().unwrap(),
            second.block().unwrap().transaction_hashes().unwrap()
        );
    }
}
