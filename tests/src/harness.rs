//! Shared fixture: a devnet with the three contracts deployed and every
//! pipeline stage wired to them the way the runtime wires them.

use cb_02_settlement::{Devnet, SettlementConfig};
use cb_03_bundle_submitter::{BundleSubmitter, SubmitterConfig};
use cb_04_meta_bundle_aggregator::{AggregatorConfig, MetaBundleAggregator};
use cb_05_match_engine::{payment_bundle, MatchConfig, MatchEngine};
use cb_06_block_assembler::{AssemblerConfig, BlockAssembler};
use shared_crypto::{sign_request, Secp256k1KeyPair};
use shared_ledger::{deploy_contract, ContractClient, LedgerClient};
use shared_types::{
    Actor, Address, Bundle, CapabilityGrant, ClearingTerms, ContractKind, RevealCondition,
    TransactionRequest, TRANSFER_GAS, U256,
};

/// Fee recipient of every meta-bundle in the suite ("A").
pub const FEE_RECIPIENT: Address = [0xa0; 20];

pub struct Network {
    pub devnet: Devnet,
    pub key: Secp256k1KeyPair,
    pub actor: Actor,
    pub payer: Secp256k1KeyPair,
    pub basic: Address,
    pub meta: Address,
    pub builder: Address,
    pub submitter: BundleSubmitter,
    pub aggregator: MetaBundleAggregator,
    pub engine: MatchEngine,
    pub assembler: BlockAssembler,
}

impl Network {
    pub async fn start() -> Self {
        let devnet = Devnet::start(SettlementConfig::default());
        let client = devnet.client();
        let key = Secp256k1KeyPair::generate();
        devnet.ledger.fund_genesis(key.address(), U256::exp10(24));
        let mut actor = Actor::new(key.address(), 0);

        let basic = deploy_contract(&client, &key, &mut actor, ContractKind::BasicBundle)
            .await
            .unwrap();
        let meta = deploy_contract(&client, &key, &mut actor, ContractKind::MetaBundle)
            .await
            .unwrap();
        let builder = deploy_contract(&client, &key, &mut actor, ContractKind::BlockBuilder)
            .await
            .unwrap();

        let submitter = BundleSubmitter::new(
            ContractClient::new(client.clone(), basic, ContractKind::BasicBundle),
            SubmitterConfig {
                extra_peekers: vec![builder],
                ..SubmitterConfig::default()
            },
        );
        let aggregator = MetaBundleAggregator::new(
            ContractClient::new(client.clone(), meta, ContractKind::MetaBundle),
            devnet.store.clone(),
            AggregatorConfig {
                extra_peekers: vec![meta, builder],
                ..AggregatorConfig::default()
            },
        );
        let engine = MatchEngine::new(
            ContractClient::new(client.clone(), meta, ContractKind::MetaBundle),
            devnet.store.clone(),
            MatchConfig {
                extra_peekers: vec![builder],
            },
        );
        let assembler = BlockAssembler::new(
            ContractClient::new(client, builder, ContractKind::BlockBuilder),
            AssemblerConfig {
                fee_recipient: FEE_RECIPIENT,
                allowed_peekers: vec![key.address()],
                ..AssemblerConfig::default()
            },
        );

        Self {
            devnet,
            key,
            actor,
            payer: Secp256k1KeyPair::generate(),
            basic,
            meta,
            builder,
            submitter,
            aggregator,
            engine,
            assembler,
        }
    }

    /// Slot of the next block.
    pub async fn next_slot(&self) -> u64 {
        self.devnet.client().header_by_number(None).await.unwrap().number + 1
    }

    /// Grant readable by the suite's own account from `slot`.
    pub fn grant(&self, slot: u64) -> CapabilityGrant {
        CapabilityGrant::new([self.key.address()], RevealCondition(slot))
    }

    /// Bundle of `size` signed transfers from fresh accounts.
    pub fn signed_bundle(&self, slot: u64, size: usize) -> Bundle {
        let transactions = (0..size as u64)
            .map(|n| {
                let sender = Secp256k1KeyPair::generate();
                sign_request(
                    &sender,
                    Actor::new(sender.address(), 0),
                    TransactionRequest::transfer([0x77; 20], U256::from(100 + n)),
                    U256::one(),
                    TRANSFER_GAS,
                )
                .unwrap()
                .0
            })
            .collect();
        Bundle::new(slot, transactions)
    }

    /// Clearing payment from the suite's payer.
    pub fn payment(&self, terms: &ClearingTerms, slot: u64) -> Bundle {
        payment_bundle(
            &self.payer,
            Actor::new(self.payer.address(), 0),
            terms,
            slot,
            U256::one(),
        )
        .unwrap()
        .0
    }
}
