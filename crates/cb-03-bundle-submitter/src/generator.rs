//! # Bundle Generator
//!
//! Builds bundles of random-value transfers. Every transfer comes from a
//! freshly generated account funded by the caller, so the bundle is valid
//! on the ledger it was generated against.

use rand::Rng;
use shared_crypto::{sign_request, Secp256k1KeyPair};
use shared_ledger::{fund_account, sync_actor, LedgerClient, LedgerError};
use shared_types::{Actor, Bundle, TransactionRequest, TRANSFER_GAS, U256};
use std::sync::Arc;
use tracing::debug;

/// Upper bound (exclusive) of a generated transfer value.
pub const MAX_TRANSFER_VALUE: u64 = 100_000;

/// Generates funded random-transfer bundles.
pub struct BundleGenerator {
    client: Arc<dyn LedgerClient>,
    funding: U256,
}

impl BundleGenerator {
    /// Generator funding each sender with `funding`.
    pub fn new(client: Arc<dyn LedgerClient>, funding: U256) -> Self {
        Self { client, funding }
    }

    /// Bundle of `size` transfers targeting `target_slot`.
    ///
    /// Each sender is funded from `funder`; the transfers themselves are
    /// signed but not sent.
    pub async fn generate(
        &self,
        funder_key: &Secp256k1KeyPair,
        funder: &mut Actor,
        size: usize,
        target_slot: u64,
    ) -> Result<Bundle, LedgerError> {
        let gas_price = self.client.suggest_gas_price().await?;
        let mut transactions = Vec::with_capacity(size);

        for _ in 0..size {
            let sender = Secp256k1KeyPair::generate();
            fund_account(&self.client, funder_key, funder, sender.address(), self.funding).await?;
            let actor = sync_actor(self.client.as_ref(), &sender).await?;

            let recipient = Secp256k1KeyPair::generate().address();
            let value = rand::thread_rng().gen_range(0..MAX_TRANSFER_VALUE);
            let (tx, _) = sign_request(
                &sender,
                actor,
                TransactionRequest::transfer(recipient, U256::from(value)),
                gas_price,
                TRANSFER_GAS,
            )?;
            transactions.push(tx);
        }

        debug!(size, target_slot, "Bundle generated");
        Ok(Bundle::new(target_slot, transactions))
    }
}
