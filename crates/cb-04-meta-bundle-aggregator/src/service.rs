//! Meta-Bundle Aggregator Service
//!
//! 1. Reject empty or oversized compositions
//! 2. Check every child exists
//! 3. Build the payload with its placeholder payment
//! 4. Commit through `MetaBundle.newMetaBundle`

use crate::config::AggregatorConfig;
use crate::domain::{placeholder_bundle, AggregateError};
use crate::ports::MetaBundleAggregatorApi;
use async_trait::async_trait;
use cb_01_capability_store::ReferenceDirectory;
use shared_crypto::Secp256k1KeyPair;
use shared_ledger::ContractClient;
use shared_types::{
    Actor, Address, CapabilityGrant, ContractCall, DataReference, MetaBundle, MetaBundleHint,
    MetaBundleHintEvent, MetaBundlePayload, U256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Meta-Bundle Aggregator bound to a deployed MetaBundle contract.
pub struct MetaBundleAggregator {
    contract: ContractClient,
    directory: Arc<dyn ReferenceDirectory>,
    config: AggregatorConfig,
}

impl MetaBundleAggregator {
    /// Create an aggregator calling `contract` and checking children in
    /// `directory`.
    pub fn new(
        contract: ContractClient,
        directory: Arc<dyn ReferenceDirectory>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            contract,
            directory,
            config,
        }
    }

    fn check_children(&self, children: &[DataReference]) -> Result<(), AggregateError> {
        if children.is_empty() {
            return Err(AggregateError::EmptyComposite);
        }
        if children.len() > self.config.max_children {
            return Err(AggregateError::TooManyChildren {
                count: children.len(),
                max: self.config.max_children,
            });
        }
        if let Some(missing) = children.iter().find(|child| !self.directory.exists(child)) {
            warn!(data_ref = %missing, "Meta-bundle child was never committed");
            return Err(AggregateError::UnknownReference { data_ref: *missing });
        }
        Ok(())
    }
}

#[async_trait]
impl MetaBundleAggregatorApi for MetaBundleAggregator {
    async fn aggregate(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        children: &[DataReference],
        clearing_value: U256,
        fee_recipient: Address,
        grant: &CapabilityGrant,
    ) -> Result<(DataReference, MetaBundleHint), AggregateError> {
        self.check_children(children)?;

        let slot = grant.reveal_condition().0;
        let meta_bundle = MetaBundle {
            child_references: children.to_vec(),
            clearing_value,
            fee_recipient,
        };
        let payload = MetaBundlePayload {
            placeholder: placeholder_bundle(&meta_bundle, slot)?,
            meta_bundle: meta_bundle.clone(),
        }
        .to_payload()?;

        debug!(slot, children = children.len(), "Submitting meta-bundle");
        let call = ContractCall::NewMetaBundle {
            slot,
            allowed_peekers: grant.viewers().to_vec(),
            extra_peekers: self.config.extra_peekers.clone(),
            meta_bundle,
        };
        let receipt = self.contract.send(key, actor, &call, payload).await?;
        let hint = self
            .contract
            .decode_event::<MetaBundleHintEvent>(&receipt)?
            .into_hint();

        info!(
            data_ref = %hint.hint.data_ref,
            tx_hash = %hex::encode(receipt.tx_hash),
            children = hint.meta_bundle.child_references.len(),
            "Meta-bundle committed"
        );
        Ok((hint.hint.data_ref, hint))
    }
}
