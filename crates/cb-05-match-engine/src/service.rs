//! Match Engine Service
//!
//! 1. Check the reference names a committed meta-bundle
//! 2. Check the payment shape and, when known, its clearing terms
//! 3. Commit through `MetaBundle.newMatch`

use crate::config::MatchConfig;
use crate::domain::{MatchError, MatchRequest};
use crate::ports::MatchEngineApi;
use async_trait::async_trait;
use cb_01_capability_store::ReferenceDirectory;
use shared_crypto::Secp256k1KeyPair;
use shared_ledger::ContractClient;
use shared_types::{Actor, ContractCall, DataReference, Hint, MatchEvent, PayloadKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Match Engine bound to a deployed MetaBundle contract.
pub struct MatchEngine {
    contract: ContractClient,
    directory: Arc<dyn ReferenceDirectory>,
    config: MatchConfig,
}

impl MatchEngine {
    /// Create a match engine calling `contract`.
    pub fn new(
        contract: ContractClient,
        directory: Arc<dyn ReferenceDirectory>,
        config: MatchConfig,
    ) -> Self {
        Self {
            contract,
            directory,
            config,
        }
    }

    fn check(&self, request: &MatchRequest) -> Result<(), MatchError> {
        let data_ref = request.meta_bundle_ref;
        match self.directory.kind_of(&data_ref) {
            Some(PayloadKind::MetaBundle) => {}
            Some(kind) => return Err(MatchError::NotAMetaBundle { data_ref, kind }),
            None => return Err(MatchError::UnknownReference { data_ref }),
        }

        if request.payment.len() != 1 {
            return Err(MatchError::PaymentShape {
                transactions: request.payment.len(),
            });
        }
        if let Some(terms) = request.terms {
            if !terms.is_satisfied_by(&request.payment) {
                warn!(meta_bundle = %data_ref, "Payment does not meet clearing terms");
                return Err(MatchError::PaymentMismatch {
                    meta_bundle_ref: data_ref,
                    expected: terms,
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MatchEngineApi for MatchEngine {
    async fn match_meta_bundle(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        request: MatchRequest,
    ) -> Result<(DataReference, Hint), MatchError> {
        self.check(&request)?;

        let slot = request.payment.target_slot;
        let payload = request.payment.to_payload()?;
        debug!(meta_bundle = %request.meta_bundle_ref, slot, "Submitting match");

        let call = ContractCall::NewMatch {
            slot,
            allowed_peekers: request.extra_grant,
            extra_peekers: self.config.extra_peekers.clone(),
            data_id: request.meta_bundle_ref,
        };
        let receipt = self.contract.send(key, actor, &call, payload).await?;
        let hint = self
            .contract
            .decode_event::<MatchEvent>(&receipt)?
            .into_hint();

        info!(
            data_ref = %hint.data_ref,
            meta_bundle = %request.meta_bundle_ref,
            tx_hash = %hex::encode(receipt.tx_hash),
            "Match committed"
        );
        Ok((hint.data_ref, hint))
    }
}
