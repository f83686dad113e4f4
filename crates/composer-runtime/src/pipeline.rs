//! # Pipeline Driver
//!
//! Runs the pipeline as ordered, named steps against a devnet:
//!
//! 1. `create accounts` - funded account, payer and fee recipient
//! 2. `deploy contracts` - BasicBundle, MetaBundle and BlockBuilder
//! 3. `send bundles` - generated bundles through the Bundle Submitter
//! 4. `send meta bundles` - one meta-bundle over every bundle
//! 5. `send matches` - the clearing payment bound to the meta-bundle
//! 6. `build block` - the match assembled into a bid
//!
//! The first failing step aborts the run; the error names the step.

use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use cb_02_settlement::Devnet;
use cb_03_bundle_submitter::{BundleGenerator, BundleSubmitter, BundleSubmitterApi, SubmitterConfig};
use cb_04_meta_bundle_aggregator::{
    AggregatorConfig, MetaBundleAggregator, MetaBundleAggregatorApi,
};
use cb_05_match_engine::{payment_bundle, MatchConfig, MatchEngine, MatchEngineApi, MatchRequest};
use cb_06_block_assembler::{AssemblerConfig, BlockAssembler, BlockAssemblerApi};
use serde::Serialize;
use shared_bus::EventFilter;
use shared_crypto::Secp256k1KeyPair;
use shared_ledger::{deploy_contract, fund_account, sync_actor, ContractClient, LedgerClient};
use shared_types::{
    Actor, Address, Bid, CapabilityGrant, ContractKind, DataReference, MetaBundleHint,
    RevealCondition, U256,
};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Named pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fund the accounts the run signs with.
    CreateAccounts,
    /// Deploy the three contracts.
    DeployContracts,
    /// Generate and submit bundles.
    SendBundles,
    /// Aggregate the bundles.
    SendMetaBundles,
    /// Match the meta-bundle.
    SendMatches,
    /// Assemble the block.
    BuildBlock,
}

impl Step {
    /// Every step in order.
    pub const ALL: [Step; 6] = [
        Step::CreateAccounts,
        Step::DeployContracts,
        Step::SendBundles,
        Step::SendMetaBundles,
        Step::SendMatches,
        Step::BuildBlock,
    ];

    /// Name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Step::CreateAccounts => "create accounts",
            Step::DeployContracts => "deploy contracts",
            Step::SendBundles => "send bundles",
            Step::SendMetaBundles => "send meta bundles",
            Step::SendMatches => "send matches",
            Step::BuildBlock => "build block",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Slot every artifact targets
    pub target_slot: u64,
    /// Committed bundles
    pub bundles: Vec<DataReference>,
    /// Committed meta-bundle
    pub meta_bundle: DataReference,
    /// Committed match
    pub match_ref: DataReference,
    /// Issued bid
    pub bid: Bid,
    /// Events seen on the hint bus during the run
    pub hints_observed: usize,
}

struct Accounts {
    key: Secp256k1KeyPair,
    actor: Actor,
    payer: Secp256k1KeyPair,
    fee_recipient: Address,
}

#[derive(Clone, Copy)]
struct Contracts {
    basic: Address,
    meta: Address,
    builder: Address,
}

/// Pipeline driver over an in-process devnet.
pub struct Pipeline {
    config: RuntimeConfig,
    devnet: Devnet,
}

impl Pipeline {
    /// Start a devnet for `config`.
    pub fn new(config: RuntimeConfig) -> Self {
        let devnet = Devnet::start(config.settlement.clone());
        Self { config, devnet }
    }

    /// Devnet the pipeline runs against.
    pub fn devnet(&self) -> &Devnet {
        &self.devnet
    }

    /// Run every step in order.
    pub async fn run(&self) -> Result<PipelineReport> {
        let client = self.devnet.client();
        let mut hints = self.devnet.bus.subscribe(EventFilter::all());

        let mut accounts = run_step(Step::CreateAccounts, self.create_accounts(&client)).await?;
        let contracts =
            run_step(Step::DeployContracts, self.deploy_contracts(&client, &mut accounts)).await?;

        let target_slot = match self.config.target_slot {
            Some(slot) => slot,
            None => {
                client
                    .header_by_number(None)
                    .await
                    .context("reading the latest header")?
                    .number
                    + 1
            }
        };
        info!(target_slot, "Target slot selected");

        let bundles = run_step(
            Step::SendBundles,
            self.send_bundles(&client, &mut accounts, contracts, target_slot),
        )
        .await?;
        let meta = run_step(
            Step::SendMetaBundles,
            self.send_meta_bundles(&client, &mut accounts, contracts, &bundles, target_slot),
        )
        .await?;
        let match_ref = run_step(
            Step::SendMatches,
            self.send_matches(&client, &mut accounts, contracts, &meta, target_slot),
        )
        .await?;
        let bid = run_step(
            Step::BuildBlock,
            self.build_block(&client, &mut accounts, contracts, match_ref, target_slot),
        )
        .await?;

        Ok(PipelineReport {
            target_slot,
            bundles,
            meta_bundle: meta.hint.data_ref,
            match_ref,
            bid,
            hints_observed: hints.drain().len(),
        })
    }

    async fn create_accounts(&self, client: &Arc<dyn LedgerClient>) -> Result<Accounts> {
        let key = match &self.config.funded_key {
            Some(encoded) => {
                Secp256k1KeyPair::from_hex(encoded).context("decoding the funded key")?
            }
            None => Secp256k1KeyPair::generate(),
        };
        self.devnet
            .ledger
            .fund_genesis(key.address(), U256::from(self.config.genesis_balance));
        let mut actor = sync_actor(client.as_ref(), &key).await?;

        let payer = Secp256k1KeyPair::generate();
        fund_account(
            client,
            &key,
            &mut actor,
            payer.address(),
            U256::from(self.config.account_funding),
        )
        .await
        .context("funding the payer")?;

        Ok(Accounts {
            key,
            actor,
            payer,
            fee_recipient: Secp256k1KeyPair::generate().address(),
        })
    }

    async fn deploy_contracts(
        &self,
        client: &Arc<dyn LedgerClient>,
        accounts: &mut Accounts,
    ) -> Result<Contracts> {
        let Accounts { key, actor, .. } = accounts;
        Ok(Contracts {
            basic: deploy_contract(client, key, actor, ContractKind::BasicBundle).await?,
            meta: deploy_contract(client, key, actor, ContractKind::MetaBundle).await?,
            builder: deploy_contract(client, key, actor, ContractKind::BlockBuilder).await?,
        })
    }

    async fn send_bundles(
        &self,
        client: &Arc<dyn LedgerClient>,
        accounts: &mut Accounts,
        contracts: Contracts,
        slot: u64,
    ) -> Result<Vec<DataReference>> {
        let submitter = BundleSubmitter::new(
            ContractClient::new(client.clone(), contracts.basic, ContractKind::BasicBundle),
            SubmitterConfig {
                extra_peekers: vec![contracts.builder],
                ..SubmitterConfig::default()
            },
        );
        let generator =
            BundleGenerator::new(client.clone(), U256::from(self.config.account_funding));
        let grant = CapabilityGrant::new([accounts.key.address()], RevealCondition(slot));

        let mut refs = Vec::with_capacity(self.config.bundle_count);
        for index in 0..self.config.bundle_count {
            let bundle = generator
                .generate(&accounts.key, &mut accounts.actor, self.config.bundle_size, slot)
                .await
                .with_context(|| format!("generating bundle {index}"))?;
            let (data_ref, _) = submitter
                .submit(&accounts.key, &mut accounts.actor, &bundle, &grant)
                .await
                .with_context(|| format!("submitting bundle {index}"))?;
            refs.push(data_ref);
        }
        Ok(refs)
    }

    async fn send_meta_bundles(
        &self,
        client: &Arc<dyn LedgerClient>,
        accounts: &mut Accounts,
        contracts: Contracts,
        children: &[DataReference],
        slot: u64,
    ) -> Result<MetaBundleHint> {
        let aggregator = MetaBundleAggregator::new(
            ContractClient::new(client.clone(), contracts.meta, ContractKind::MetaBundle),
            self.devnet.store.clone(),
            AggregatorConfig {
                extra_peekers: vec![contracts.meta, contracts.builder],
                ..AggregatorConfig::default()
            },
        );
        let grant = CapabilityGrant::new([accounts.key.address()], RevealCondition(slot));
        let (_, hint) = aggregator
            .aggregate(
                &accounts.key,
                &mut accounts.actor,
                children,
                U256::from(self.config.clearing_value),
                accounts.fee_recipient,
                &grant,
            )
            .await?;
        Ok(hint)
    }

    async fn send_matches(
        &self,
        client: &Arc<dyn LedgerClient>,
        accounts: &mut Accounts,
        contracts: Contracts,
        meta: &MetaBundleHint,
        slot: u64,
    ) -> Result<DataReference> {
        let engine = MatchEngine::new(
            ContractClient::new(client.clone(), contracts.meta, ContractKind::MetaBundle),
            self.devnet.store.clone(),
            MatchConfig {
                extra_peekers: vec![contracts.builder],
            },
        );
        let gas_price = client.suggest_gas_price().await?;
        let payer = sync_actor(client.as_ref(), &accounts.payer).await?;
        let (payment, _) = payment_bundle(
            &accounts.payer,
            payer,
            &meta.meta_bundle.clearing_terms(),
            slot,
            gas_price,
        )
        .context("signing the clearing payment")?;

        let request = MatchRequest::from_hint(meta, payment, Vec::new());
        let (data_ref, _) = engine
            .match_meta_bundle(&accounts.key, &mut accounts.actor, request)
            .await?;
        Ok(data_ref)
    }

    async fn build_block(
        &self,
        client: &Arc<dyn LedgerClient>,
        accounts: &mut Accounts,
        contracts: Contracts,
        match_ref: DataReference,
        slot: u64,
    ) -> Result<Bid> {
        let assembler = BlockAssembler::new(
            ContractClient::new(client.clone(), contracts.builder, ContractKind::BlockBuilder),
            AssemblerConfig {
                fee_recipient: accounts.fee_recipient,
                allowed_peekers: vec![accounts.key.address()],
                ..self.config.assembler.clone()
            },
        );
        let bid = assembler
            .assemble(&accounts.key, &mut accounts.actor, slot, vec![match_ref])
            .await?;
        Ok(bid)
    }
}

async fn run_step<T>(step: Step, work: impl Future<Output = Result<T>>) -> Result<T> {
    info!(step = %step, "Starting step");
    let output = work.await.with_context(|| format!("step '{step}' failed"))?;
    info!(step = %step, "Step complete");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_produces_bid() {
        let config = RuntimeConfig::default();
        let pipeline = Pipeline::new(config.clone());

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.bundles.len(), config.bundle_count);
        assert_eq!(report.bid.reveal_condition(), RevealCondition(report.target_slot));
        let block = report.bid.block().unwrap();
        assert_eq!(
            block.transactions.len(),
            config.bundle_count * config.bundle_size + 1
        );
        assert_eq!(block.value, U256::from(config.clearing_value));
        // bundles, meta-bundle, payment, match and bid
        assert_eq!(report.hints_observed, config.bundle_count + 4);
    }

    #[tokio::test]
    async fn test_failure_names_the_step() {
        let config = RuntimeConfig {
            bundle_count: 0,
            ..RuntimeConfig::default()
        };

        let err = Pipeline::new(config).run().await.unwrap_err();

        assert!(err.to_string().contains("send meta bundles"));
    }

    #[test]
    fn test_steps_in_order() {
        let names: Vec<_> = Step::ALL.iter().map(Step::name).collect();
        assert_eq!(names.first(), Some(&"create accounts"));
        assert_eq!(names.last(), Some(&"build block"));
    }
}
