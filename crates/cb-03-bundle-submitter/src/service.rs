//! Bundle Submitter Service
//!
//! 1. Validate the bundle
//! 2. Commit it through `BasicBundle.newBundle`
//! 3. Rebuild the hint from `HintEvent`

use crate::config::SubmitterConfig;
use crate::domain::{validate, InvalidBundle, SubmitError};
use crate::ports::BundleSubmitterApi;
use async_trait::async_trait;
use shared_crypto::Secp256k1KeyPair;
use shared_ledger::ContractClient;
use shared_types::{
    Actor, Bundle, CapabilityGrant, ContractCall, DataReference, Hint, HintEvent, PayloadKind,
};
use tracing::{debug, info};

/// Bundle Submitter bound to a deployed BasicBundle contract.
pub struct BundleSubmitter {
    contract: ContractClient,
    config: SubmitterConfig,
}

impl BundleSubmitter {
    /// Create a submitter calling `contract`.
    pub fn new(contract: ContractClient, config: SubmitterConfig) -> Self {
        Self { contract, config }
    }

    /// Submitter configuration.
    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }
}

#[async_trait]
impl BundleSubmitterApi for BundleSubmitter {
    async fn submit(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        bundle: &Bundle,
        grant: &CapabilityGrant,
    ) -> Result<(DataReference, Hint), SubmitError> {
        let invalid = |reason| SubmitError::InvalidBundle {
            target_slot: bundle.target_slot,
            reason,
        };
        validate(bundle, grant, &self.config).map_err(invalid)?;
        let payload = bundle
            .to_payload()
            .map_err(|e| invalid(InvalidBundle::Encoding(e)))?;

        debug!(
            slot = bundle.target_slot,
            transactions = bundle.len(),
            "Submitting bundle"
        );
        let call = ContractCall::NewBundle {
            slot: bundle.target_slot,
            allowed_peekers: grant.viewers().to_vec(),
            extra_peekers: self.config.extra_peekers.clone(),
        };
        let receipt = self.contract.send(key, actor, &call, payload).await?;
        let hint = self
            .contract
            .decode_event::<HintEvent>(&receipt)?
            .into_hint(PayloadKind::Bundle);

        info!(
            data_ref = %hint.data_ref,
            tx_hash = %hex::encode(receipt.tx_hash),
            slot = bundle.target_slot,
            "Bundle committed"
        );
        Ok((hint.data_ref, hint))
    }
}
