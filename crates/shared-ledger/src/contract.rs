//! # Contract Client
//!
//! One call is one settlement transaction plus a blocking wait. Status 0 is a
//! rejected commit; a successful receipt without the expected event is a
//! malformed response and is logged with the full receipt.

use crate::errors::{CommitError, LedgerError};
use crate::pending::PendingTransaction;
use crate::ports::LedgerClient;
use crate::signer::sign_and_send;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{
    Actor, Address, ContractCall, ContractEvent, ContractKind, Receipt, TransactionRequest,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Handle to a deployed contract.
#[derive(Clone)]
pub struct ContractClient {
    client: Arc<dyn LedgerClient>,
    address: Address,
    kind: ContractKind,
}

impl ContractClient {
    /// Bind to the `kind` contract deployed at `address`.
    pub fn new(client: Arc<dyn LedgerClient>, address: Address, kind: ContractKind) -> Self {
        Self {
            client,
            address,
            kind,
        }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Contract kind.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Underlying ledger client.
    pub fn ledger(&self) -> &Arc<dyn LedgerClient> {
        &self.client
    }

    /// Send `call` with `confidential_inputs` and wait for a successful receipt.
    pub async fn send(
        &self,
        key: &Secp256k1KeyPair,
        actor: &mut Actor,
        call: &ContractCall,
        confidential_inputs: Vec<u8>,
    ) -> Result<Receipt, CommitError> {
        let data = call.encode().map_err(LedgerError::from)?;
        let pending: PendingTransaction = sign_and_send(
            &self.client,
            key,
            actor,
            TransactionRequest::call(self.address, data),
            confidential_inputs,
        )
        .await?;
        let receipt = pending.wait().await?;

        if !receipt.is_success() {
            warn!(
                contract = ?self.kind,
                method = call.method(),
                tx_hash = %hex::encode(receipt.tx_hash),
                reason = receipt.revert_reason.as_deref().unwrap_or("unknown"),
                "Contract call reverted"
            );
            return Err(CommitError::Rejected {
                tx_hash: receipt.tx_hash,
                reason: receipt.revert_reason,
            });
        }

        debug!(
            contract = ?self.kind,
            method = call.method(),
            tx_hash = %hex::encode(receipt.tx_hash),
            block = receipt.block_number,
            "Contract call confirmed"
        );
        Ok(receipt)
    }

    /// Decode event `E` from a successful receipt.
    pub fn decode_event<E: ContractEvent>(&self, receipt: &Receipt) -> Result<E, CommitError> {
        E::from_receipt(receipt).map_err(|source| {
            error!(
                contract = ?self.kind,
                event = E::SIGNATURE,
                receipt = ?receipt,
                error = %source,
                "Failed to decode contract event"
            );
            CommitError::Malformed {
                tx_hash: receipt.tx_hash,
                source,
            }
        })
    }
}

impl std::fmt::Debug for ContractClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractClient")
            .field("address", &hex::encode(self.address))
            .field("kind", &self.kind)
            .finish()
    }
}
